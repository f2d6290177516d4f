use axum::Router;

use crate::alert::LightControl;
use crate::state::AppState;

pub mod alert;

pub fn router<C: LightControl + 'static>(appstate: AppState<C>) -> Router<()> {
    alert::router::<C>().with_state(appstate)
}
