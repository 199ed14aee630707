use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The hex keypad layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
///
/// Indexed by keypad key.
const KEYMAP: [Keycode; 16] = [
    Keycode::X,
    Keycode::Num1,
    Keycode::Num2,
    Keycode::Num3,
    Keycode::Q,
    Keycode::W,
    Keycode::E,
    Keycode::A,
    Keycode::S,
    Keycode::D,
    Keycode::Z,
    Keycode::C,
    Keycode::Num4,
    Keycode::R,
    Keycode::F,
    Keycode::V,
];

/// The keypad key bound to a physical key, if any.
pub fn keymap(key: Keycode) -> Option<u8> {
    KEYMAP
        .iter()
        .position(|&mapped| mapped == key)
        .map(|index| index as u8)
}

/// Emulator controls that aren't part of the keypad.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hotkey {
    Slower,
    Faster,
    Quit,
}

pub fn hotkey(key: Keycode) -> Option<Hotkey> {
    match key {
        Keycode::Minus => Some(Hotkey::Slower),
        Keycode::Equals => Some(Hotkey::Faster),
        Keycode::Escape => Some(Hotkey::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_keypad_corners() {
        assert_eq!(keymap(Keycode::Num1), Some(0x1));
        assert_eq!(keymap(Keycode::Num4), Some(0xC));
        assert_eq!(keymap(Keycode::Z), Some(0xA));
        assert_eq!(keymap(Keycode::V), Some(0xF));
        assert_eq!(keymap(Keycode::X), Some(0x0));
    }

    #[test]
    fn test_every_key_is_mapped_once() {
        let mut keys: Vec<u8> = KEYMAP.iter().filter_map(|&k| keymap(k)).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0x0..=0xF).collect::<Vec<u8>>());
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keymap(Keycode::Space), None);
        assert_eq!(keymap(Keycode::Minus), None);
        assert_eq!(hotkey(Keycode::Minus), Some(Hotkey::Slower));
        assert_eq!(hotkey(Keycode::Q), None);
    }
}
