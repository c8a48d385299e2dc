// Entity counts
pub const NUMBER_OF_DIAMONDS: usize = 20;
pub const NUMBER_OF_CRATERS: usize = 8;
pub const TOTAL_ENERGY: i32 = 100;

// Physics (logical pixels, seconds)
pub const PHYS_DOWN_ACCEL_SEC: f32 = 300.0;
pub const PHYS_ACCEL_FACTOR_X: f32 = 3.0;
pub const GRAVITY_MOON: f32 = 1.6;
pub const INITIAL_JUMP_SPEED: f32 = -275.0;
pub const PHYS_SPEED_MAX: f32 = 180.0;
pub const CRATER_BOUNCE_SPEED: f32 = -150.0;
pub const CRATER_BOUNCE_DAMPING: f32 = 0.5;

// Scroll limits: the right bound is fixed, the left bound is in canvas widths
pub const SCROLL_MAX: f32 = 150.0;
pub const SCROLL_MIN_CANVAS_WIDTHS: f32 = 4.0;

// Heading sawtooth wavelength (scroll pixels per full turn)
pub const HEADING_WAVELENGTH: f32 = 223.0;

// Diamonds bounce this far from the top and bottom edges
pub const DIAMOND_BOUNCE_MARGIN: f32 = 10.0;
pub const MAX_DIAMOND_MOVEMENT: f32 = 40.0;
pub const DIAMOND_MIN_SPEED: f32 = 2.0;
pub const DIAMOND_SPACING: f32 = 200.0;
pub const CRATER_SPACING: f32 = 350.0;
// Crater lip test points sit this far above the ground line
pub const CRATER_LIP_HEIGHT: f32 = 10.0;

// Timing
pub const RESUME_GRACE_MS: u64 = 100;
pub const FRAME_INTERVAL_MS: u64 = 16;

// Default logical canvas and sprite sizes
pub const DEFAULT_CANVAS_WIDTH: u32 = 480;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 320;
pub const BALL_WIDTH: i32 = 48;
pub const BALL_HEIGHT: i32 = 48;
pub const CRATER_WIDTH: f32 = 90.0;
pub const CRATER_HEIGHT: f32 = 40.0;
pub const DIAMOND_SIZE: f32 = 16.0;

// HUD
pub const GAUGE_WIDTH: f32 = 150.0;

// Input adapter
pub const KEY_TILT_DEGREES: f32 = 6.0;
pub const TILT_HOLD_MS: u64 = 200;

// Save system
pub const SAVE_VERSION_MAGIC: u64 = 0x4C4C455854534156; // "LLEXTSAV" in hex
