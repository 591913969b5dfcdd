pub mod candidates;
pub mod detect;
pub mod led_overlay;
pub mod serial;
