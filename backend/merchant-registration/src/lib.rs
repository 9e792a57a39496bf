pub mod registration;
pub mod state;
pub mod utils;

pub use registration::{FormOptions, FormServices, RegistrationForm, UnknownField};
pub use state::{FormPhase, FormStep, SubmitOutcome, UiState};
