/// Background presets as plain data. Colours are 0xRRGGBB sRGB.
pub enum BackgroundDef {
    Color(u32),
    /// Bottom stop, top stop.
    Gradient(u32, u32),
    Starfield,
}

pub const BACKGROUND_PRESETS: &[BackgroundDef] = &[
    BackgroundDef::Color(0xf0f0f0),
    BackgroundDef::Color(0x87ceeb),
    BackgroundDef::Color(0xffb6c1),
    BackgroundDef::Gradient(0x1e90ff, 0xff69b4),
    BackgroundDef::Starfield,
];

pub const STARFIELD_CLEAR_COLOR: u32 = 0x000000;

/// Number of points generated for the star field.
pub const STAR_COUNT: usize = 5000;

/// Edge length of the cube the stars are scattered in, centred on the origin.
pub const STAR_FIELD_EXTENT: f32 = 2000.0;

/// Render layer reserved for the gradient backdrop pass.
pub const GRADIENT_RENDER_LAYER: usize = 1;

/// The backdrop camera draws before the main camera.
pub const GRADIENT_CAMERA_ORDER: isize = -1;
