//! Per-validator state machine of the predeposit guarantee.
//!
//! A validator record only ever moves forward:
//!
//! ```text
//!            predeposit            prove valid           activate
//!   None ───────────────▶ Predeposited ─────────▶ Proven ─────────▶ Activated
//!     │                        │                    ▲
//!     │      prove unknown     │ prove invalid      │
//!     └────────────────────────┼────────────────────┘
//!                              ▼
//!                          Disproven ──────────────▶ Compensated
//!                                      compensate
//! ```
//!
//! `Activated` and `Compensated` are terminal. Top-ups are accepted on
//! `Proven` and `Activated` records and leave the stage unchanged.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::panic))]

mod input;
mod stage;
mod transition;

pub use input::Input;
pub use stage::ValidatorStage;
pub use transition::{apply, InvalidTransition};
