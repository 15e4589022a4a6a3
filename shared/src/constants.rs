// Reward service endpoints
pub const SCRATCH_REVEAL_ENDPOINT: &str = "/scratch-reveal";
pub const SPIN_ENDPOINT: &str = "/spin";

// Scratch card canvas
pub const SCRATCH_CANVAS_WIDTH: u32 = 400;
pub const SCRATCH_CANVAS_HEIGHT: u32 = 250;
pub const SCRATCH_CANVAS_WIDTH_SMALL: u32 = 300;
pub const SCRATCH_CANVAS_HEIGHT_SMALL: u32 = 200;
pub const SMALL_SCREEN_BREAKPOINT: f64 = 600.0;

// Scratch gesture
pub const BRUSH_RADIUS: f64 = 25.0;
pub const REVEAL_THRESHOLD: f64 = 0.5;

// Wheel canvas
pub const WHEEL_CANVAS_SIZE: u32 = 550;
pub const WHEEL_CENTER: f64 = 275.0;
pub const WHEEL_RADIUS: f64 = 240.0;
pub const WHEEL_HUB_RADIUS: f64 = 30.0;
pub const LABEL_MAX_WIDTH: f64 = 110.0;
pub const LABEL_LINE_HEIGHT: f64 = 20.0;

// Spin animation
pub const SPIN_DURATION_MS: f64 = 4500.0;
pub const FULL_ROTATIONS: f64 = 7.0;

// Popup timing
pub const RESTORED_POPUP_DELAY_MS: u32 = 500;
pub const REVEAL_POPUP_DELAY_MS: u32 = 1000;

// WhatsApp handoff
pub const WHATSAPP_NUMBER: &str = "917034942438";
pub const SCRATCH_RESULT_HEADING: &str = "🎉 Scratch & Win Result!";
pub const WHEEL_RESULT_HEADING: &str = "🎉 Spin & Win Result!";
pub const CLOSING_LINE: &str = "I'd like to book this offer!";
