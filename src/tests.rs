use super::*;

mod confirm_delete;
mod rating_input;
