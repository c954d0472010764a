use serde::Serialize;

use super::token::{AnimationToken, FlipMode, STATIC_ICON_MARKER};

/// Tokens per animation sequence
pub const SEQUENCE_LEN: usize = 64;

/// What the renderer needs to draw one icon on a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IconFrame {
    /// Tile row in the icon sheet, 0–7
    pub row: u8,
    pub flip: FlipMode,
    /// Tile column in the icon sheet; always 0 for now
    pub column: u8,
}

/// Playback state of one icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSlot {
    sequence: [u16; SEQUENCE_LEN],
    cursor: usize,
    delay: u16,
    frame: IconFrame,
}

impl Default for IconSlot {
    fn default() -> Self {
        Self {
            sequence: [0; SEQUENCE_LEN],
            cursor: 0,
            delay: 0,
            frame: IconFrame::default(),
        }
    }
}

impl IconSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the token sequence. Playback position is kept.
    pub fn load(&mut self, tokens: &[u16; SEQUENCE_LEN]) {
        self.sequence = *tokens;
    }

    /// Zero the token sequence. Playback position is kept.
    pub fn clear(&mut self) {
        self.sequence = [0; SEQUENCE_LEN];
    }

    /// Rewind to the first token
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.delay = 0;
    }

    pub fn sequence(&self) -> &[u16; SEQUENCE_LEN] {
        &self.sequence
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn delay(&self) -> u16 {
        self.delay
    }

    pub fn frame(&self) -> IconFrame {
        self.frame
    }

    /// Whether the sequence at the cursor marks a non-animated icon
    pub fn is_static(&self) -> bool {
        self.sequence.get(self.cursor..self.cursor + 2) == Some(&STATIC_ICON_MARKER[..])
    }

    /// Advance one display tick and return the frame to draw
    pub fn tick(&mut self) -> IconFrame {
        if self.is_static() {
            self.frame.row = 0;
            self.frame.flip = FlipMode::None;
            return self.frame;
        }

        let token = AnimationToken(self.sequence[self.cursor]);
        // Unknown tokens keep the previous row and flip
        if let Some((row, flip)) = token.decode() {
            self.frame.row = row;
            self.frame.flip = flip;
        }

        self.delay = self.delay.saturating_add(1);
        if self.delay >= token.hold() {
            self.delay = 0;
            self.cursor += 1;
            if self.cursor >= SEQUENCE_LEN
                || AnimationToken(self.sequence[self.cursor]).is_terminator()
            {
                self.cursor = 0;
            }
        }

        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(tokens: &[u16]) -> [u16; SEQUENCE_LEN] {
        let mut seq = [0u16; SEQUENCE_LEN];
        seq[..tokens.len()].copy_from_slice(tokens);
        seq
    }

    fn slot_with(tokens: &[u16]) -> IconSlot {
        let mut slot = IconSlot::new();
        slot.load(&sequence(tokens));
        slot
    }

    #[test]
    fn test_default_state_is_neutral() {
        let slot = IconSlot::new();
        assert_eq!(
            slot.frame(),
            IconFrame {
                row: 0,
                flip: FlipMode::None,
                column: 0
            }
        );
        assert_eq!(slot.cursor(), 0);
        assert_eq!(slot.delay(), 0);
        assert!(slot.sequence().iter().all(|&t| t == 0));
    }

    #[test]
    fn test_static_icon_never_moves() {
        let mut slot = slot_with(&[0x0001, 0x0100, 0x0305]);
        for _ in 0..500 {
            let frame = slot.tick();
            assert_eq!(frame.row, 0);
            assert_eq!(frame.flip, FlipMode::None);
            assert_eq!(slot.cursor(), 0);
            assert_eq!(slot.delay(), 0);
        }
    }

    #[test]
    fn test_hold_duration() {
        let mut slot = slot_with(&[0x0305, 0x0105]);
        for tick in 1..=4 {
            let frame = slot.tick();
            assert_eq!((frame.row, frame.flip), (3, FlipMode::None), "tick {tick}");
            assert_eq!(slot.cursor(), 0, "tick {tick}");
            assert_eq!(slot.delay(), tick);
        }

        let frame = slot.tick();
        assert_eq!(frame.row, 3);
        assert_eq!(slot.cursor(), 1);
        assert_eq!(slot.delay(), 0);

        assert_eq!(slot.tick().row, 1);
    }

    #[test]
    fn test_zero_hold_advances_immediately() {
        let mut slot = slot_with(&[0xC200, 0x0401]);
        let frame = slot.tick();
        assert_eq!((frame.row, frame.flip), (2, FlipMode::Both));
        assert_eq!(slot.cursor(), 1);
    }

    #[test]
    fn test_loops_on_terminator() {
        let mut slot = slot_with(&[0x0101, 0x4201]);
        assert_eq!(slot.tick().row, 1);
        assert_eq!(slot.cursor(), 1);

        let frame = slot.tick();
        assert_eq!((frame.row, frame.flip), (2, FlipMode::Horizontal));
        assert_eq!(slot.cursor(), 0);

        assert_eq!(slot.tick().row, 1);
    }

    #[test]
    fn test_cleared_sequence_stays_neutral() {
        let mut slot = slot_with(&[0x8701, 0x8601]);
        slot.tick();
        slot.clear();
        for _ in 0..100 {
            let frame = slot.tick();
            assert_eq!((frame.row, frame.flip), (0, FlipMode::None));
            assert_eq!(slot.cursor(), 0);
        }
    }

    #[test]
    fn test_unknown_token_freezes_frame_but_keeps_timing() {
        let mut slot = slot_with(&[0x4502, 0x0803, 0x0101]);
        slot.tick();
        assert_eq!(slot.tick().row, 5);
        assert_eq!(slot.cursor(), 1);

        for _ in 0..3 {
            let frame = slot.tick();
            assert_eq!((frame.row, frame.flip), (5, FlipMode::Horizontal));
        }
        assert_eq!(slot.cursor(), 2);
        assert_eq!(slot.tick().row, 1);
    }

    #[test]
    fn test_load_keeps_playback_position() {
        let mut slot = slot_with(&[0x0001, 0x0001, 0x0301]);
        slot.tick();
        slot.tick();
        assert_eq!(slot.cursor(), 2);

        slot.load(&sequence(&[0x0101, 0x0201, 0x0601, 0x0701]));
        assert_eq!(slot.cursor(), 2);
        assert_eq!(slot.tick().row, 6);
    }

    #[test]
    fn test_load_keeps_delay_mid_hold() {
        let mut slot = slot_with(&[0x0305]);
        slot.tick();
        slot.tick();
        assert_eq!(slot.delay(), 2);

        slot.load(&sequence(&[0x4703]));
        assert_eq!(slot.cursor(), 0);
        assert_eq!(slot.delay(), 2);

        // The carried-over count already meets the new hold of 3
        let frame = slot.tick();
        assert_eq!((frame.row, frame.flip), (7, FlipMode::Horizontal));
        assert_eq!(slot.delay(), 0);
        assert_eq!(slot.cursor(), 0);
    }

    #[test]
    fn test_clear_keeps_cursor_and_delay() {
        let mut slot = slot_with(&[0x0101, 0x0204]);
        slot.tick();
        slot.tick();
        assert_eq!(slot.cursor(), 1);
        assert_eq!(slot.delay(), 1);

        slot.clear();
        assert_eq!(slot.cursor(), 1);
        assert_eq!(slot.delay(), 1);
        assert!(slot.sequence().iter().all(|&t| t == 0));

        // Token 0 has no hold, so the next tick loops back to the start
        let frame = slot.tick();
        assert_eq!((frame.row, frame.flip), (0, FlipMode::None));
        assert_eq!(slot.cursor(), 0);
    }

    #[test]
    fn test_rewind() {
        let mut slot = slot_with(&[0x0001, 0x0103]);
        slot.tick();
        slot.tick();
        slot.rewind();
        assert_eq!(slot.cursor(), 0);
        assert_eq!(slot.delay(), 0);
    }

    #[test]
    fn test_full_sequence_without_terminator_wraps() {
        let mut slot = slot_with(&[0x0200; SEQUENCE_LEN]);
        for _ in 0..SEQUENCE_LEN - 1 {
            slot.tick();
        }
        assert_eq!(slot.cursor(), SEQUENCE_LEN - 1);
        slot.tick();
        assert_eq!(slot.cursor(), 0);
    }

    #[test]
    fn test_static_marker_check_at_last_index() {
        let mut tokens = [0x0300u16; SEQUENCE_LEN];
        tokens[SEQUENCE_LEN - 1] = 0x0001;
        let mut slot = slot_with(&tokens);
        for _ in 0..SEQUENCE_LEN - 1 {
            slot.tick();
        }
        assert_eq!(slot.cursor(), SEQUENCE_LEN - 1);
        assert!(!slot.is_static());
        let frame = slot.tick();
        assert_eq!(frame.row, 0);
        assert_eq!(slot.cursor(), 0);
    }

    #[test]
    fn test_static_marker_mid_sequence() {
        let mut slot = slot_with(&[0x0301, 0x0001, 0x0100]);
        assert_eq!(slot.tick().row, 3);
        assert_eq!(slot.cursor(), 1);
        for _ in 0..10 {
            assert_eq!(slot.tick().row, 0);
            assert_eq!(slot.cursor(), 1);
        }
    }
}
