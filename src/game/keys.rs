/// Keys that drive paddles while they are held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::W, Key::S, Key::ArrowUp, Key::ArrowDown];

    fn bit(self) -> u8 {
        match self {
            Key::W => 1 << 0,
            Key::S => 1 << 1,
            Key::ArrowUp => 1 << 2,
            Key::ArrowDown => 1 << 3,
        }
    }
}

/// The set of paddle keys held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    bits: u8,
}

impl KeySnapshot {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: Key) -> Self {
        self.bits |= key.bit();
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<Key> for KeySnapshot {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}
