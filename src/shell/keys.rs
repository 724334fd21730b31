//! The keys the front-ends care about.

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    D,
    Q,
    S,
    W,
    X,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Escape,
}

impl Key {
    pub const DIGITS: [Key; 10] = [
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];

    /// The digit a number key stands for.
    pub fn digit(self) -> Option<u8> {
        Key::DIGITS
            .iter()
            .position(|&key| key == self)
            .map(|i| i as u8)
    }

    pub(crate) fn from_glfw(key: glfw::Key) -> Option<Self> {
        use glfw::Key as G;
        Some(match key {
            G::Num0 | G::Kp0 => Key::Num0,
            G::Num1 | G::Kp1 => Key::Num1,
            G::Num2 | G::Kp2 => Key::Num2,
            G::Num3 | G::Kp3 => Key::Num3,
            G::Num4 | G::Kp4 => Key::Num4,
            G::Num5 | G::Kp5 => Key::Num5,
            G::Num6 | G::Kp6 => Key::Num6,
            G::Num7 | G::Kp7 => Key::Num7,
            G::Num8 | G::Kp8 => Key::Num8,
            G::Num9 | G::Kp9 => Key::Num9,
            G::A => Key::A,
            G::D => Key::D,
            G::Q => Key::Q,
            G::S => Key::S,
            G::W => Key::W,
            G::X => Key::X,
            G::Up => Key::Up,
            G::Down => Key::Down,
            G::Left => Key::Left,
            G::Right => Key::Right,
            G::Enter | G::KpEnter => Key::Enter,
            G::Backspace => Key::Backspace,
            G::Escape => Key::Escape,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_values_match_their_keys() {
        for (i, key) in Key::DIGITS.iter().enumerate() {
            assert_eq!(key.digit(), Some(i as u8));
        }
        assert_eq!(Key::Enter.digit(), None);
    }
}
