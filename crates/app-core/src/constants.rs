use std::time::Duration;

// Shared tuning constants for the gesture pipeline, interaction and scene.

// Display (portrait, 2:3)
pub const DISPLAY_WIDTH: f32 = 800.0;
pub const DISPLAY_HEIGHT: f32 = 1200.0;

// Landmark stream
pub const LANDMARK_COUNT: usize = 21;
pub const HAND_SIZE_MIN: f32 = 0.001; // floor for the wrist -> middle MCP distance

// Cursor smoothing
pub const SMOOTHING_ALPHA: f32 = 0.2; // smooth += (target - smooth) * α

// Pinch hysteresis on the normalized pinch ratio
pub const PINCH_ON_RATIO: f32 = 0.40; // lower => stricter pinch
pub const PINCH_OFF_RATIO: f32 = 0.55; // higher => more forgiving hold
pub const PINCH_ON_FRAMES: u32 = 3;
pub const PINCH_OFF_FRAMES: u32 = 4;

// Interaction
pub const RELEASE_GRACE_FRAMES: u32 = 3;
pub const DROP_SNAP_OFFSET_Y: f32 = 120.0; // how far above the target centre a poured object sits

// Reaction timing
pub const REACTION_STEP: Duration = Duration::from_millis(90);
pub const REACTION_IDLE_DELAY: Duration = Duration::from_millis(200);
pub const POUR_NOTICE: Duration = Duration::from_millis(800);

// Visual layers
pub const TARGET_LAYER: i32 = 0;
pub const OBJECT_LAYER: i32 = 10;
pub const HELD_LAYER: i32 = 1000; // above everything while dragged

// Scene layout (fractions of the display)
pub const TABLE_Y_FRAC: f32 = 0.57;
pub const CAULDRON_SIZE: [f32; 2] = [260.0, 240.0];
pub const BOTTLE_SIZE: [f32; 2] = [50.0, 90.0];
pub const BOTTLE_HOME_X_FRACS: [f32; 3] = [0.20, 0.80, 0.88];

// Cursor visuals (presentation only)
pub const CURSOR_DOT_FOLLOW: f32 = 0.4;
pub const CURSOR_RING_FOLLOW: f32 = 0.2;
pub const CURSOR_DOT_RADIUS: f32 = 10.0;
pub const CURSOR_RING_RADIUS: f32 = 18.0;
