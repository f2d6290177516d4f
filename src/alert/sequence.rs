use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{Rgb, XY};

pub const ALERT_BRIGHTNESS: u8 = 255;
pub const REST_BRIGHTNESS: u8 = 30;

/// Number of alert pulses in a blink sequence
pub const PULSES: usize = 3;

/// Desired light state, in the shape the hue v1 api expects for
/// `PUT /lights/<id>/state`.
#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LightState {
    pub on: bool,
    pub xy: XY,
    pub bri: u8,
}

impl LightState {
    #[must_use]
    pub fn alert(color: Rgb) -> Self {
        Self {
            on: true,
            xy: color.to_xy(),
            bri: ALERT_BRIGHTNESS,
        }
    }

    #[must_use]
    pub fn rest() -> Self {
        Self {
            on: false,
            xy: Rgb::WHITE.to_xy(),
            bri: REST_BRIGHTNESS,
        }
    }
}

#[derive(Copy, Debug, Clone, PartialEq)]
pub struct AlertStep {
    pub state: LightState,
    /// Time to wait after the state has been applied
    pub hold: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertSequence {
    steps: Vec<AlertStep>,
}

impl AlertSequence {
    /// Three pulses of `color`, each followed by a rest gap. Pulses are held
    /// for twice `delay`, gaps for `delay`. The final gap is not held.
    #[must_use]
    pub fn blink(color: Rgb, delay: Duration) -> Self {
        let alert = LightState::alert(color);
        let rest = LightState::rest();

        let mut steps = Vec::with_capacity(PULSES * 2);
        for pulse in 0..PULSES {
            steps.push(AlertStep {
                state: alert,
                hold: delay * 2,
            });

            let last = pulse + 1 == PULSES;
            steps.push(AlertStep {
                state: rest,
                hold: if last { Duration::ZERO } else { delay },
            });
        }

        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[AlertStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[test]
    fn blink_shape() {
        let seq = AlertSequence::blink(Rgb::new(0, 255, 0), DELAY);

        assert_eq!(seq.steps().len(), 6);

        let power: Vec<bool> = seq.steps().iter().map(|s| s.state.on).collect();
        assert_eq!(power, [true, false, true, false, true, false]);

        let bri: Vec<u8> = seq.steps().iter().map(|s| s.state.bri).collect();
        assert_eq!(bri, [255, 30, 255, 30, 255, 30]);
    }

    #[test]
    fn blink_colors() {
        let seq = AlertSequence::blink(Rgb::new(255, 0, 0), DELAY);

        for (index, step) in seq.steps().iter().enumerate() {
            if index % 2 == 0 {
                assert_eq!(step.state.xy, XY::new(0.7006, 0.2993));
            } else {
                assert_eq!(step.state.xy, XY::new(0.3227, 0.329));
            }
        }
    }

    #[test]
    fn blink_holds() {
        let seq = AlertSequence::blink(Rgb::WHITE, DELAY);

        let holds: Vec<u64> = seq
            .steps()
            .iter()
            .map(|s| u64::try_from(s.hold.as_millis()).unwrap())
            .collect();

        assert_eq!(holds, [800, 400, 800, 400, 800, 0]);
        assert_eq!(holds.iter().sum::<u64>(), 3200);
    }

    #[test]
    fn state_body() {
        let json = serde_json::to_value(LightState::alert(Rgb::new(0, 255, 0))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"on": true, "xy": [0.1724, 0.7468], "bri": 255})
        );
    }
}
