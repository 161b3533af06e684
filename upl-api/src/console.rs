//! Console key and color types

/// Scan code of the Escape key
pub const SCAN_ESC: u16 = 0x0017;
/// Null unicode character, used for keys without a printable form
pub const CHAR_NULL: u16 = 0x0000;

/// Keystroke as reported by a simple text input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputKey {
    pub scan_code: u16,
    pub unicode_char: u16,
}

impl InputKey {
    /// Escape key
    pub const ESCAPE: InputKey = InputKey {
        scan_code: SCAN_ESC,
        unicode_char: CHAR_NULL,
    };
}

/// Graphics output BLT pixel (blue, green, red, reserved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel {
        blue: 0,
        green: 0,
        red: 0,
        reserved: 0,
    };

    pub const WHITE: Pixel = Pixel {
        blue: 0xff,
        green: 0xff,
        red: 0xff,
        reserved: 0xff,
    };
}

static_assertions::assert_eq_size!(Pixel, u32);
