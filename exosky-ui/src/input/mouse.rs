use nalgebra::{
    Point2,
    Vector2,
    Vector3,
};

/// Pointer events as delivered by the host page. Positions are canvas
/// offsets in CSS pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum MouseEvent {
    ButtonUp {
        button: MouseButton,
        position: Point2<f32>,
    },
    ButtonDown {
        button: MouseButton,
        position: Point2<f32>,
    },
    /// Fired after a button went down and up without the pointer leaving.
    Click {
        button: MouseButton,
        position: Point2<f32>,
    },
    Move {
        position: Point2<f32>,
        delta: Vector2<f32>,
    },
    Enter,
    Leave,
    Wheel {
        delta: Vector3<f32>,
        mode: WheelDeltaMode,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

impl MouseButton {
    /// From the DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            3 => Some(Self::Back),
            4 => Some(Self::Forward),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    /// From the DOM `WheelEvent.deltaMode` value.
    pub fn from_dom(mode: u32) -> Option<Self> {
        match mode {
            0x00 => Some(Self::Pixel),
            0x01 => Some(Self::Line),
            0x02 => Some(Self::Page),
            _ => None,
        }
    }
}
