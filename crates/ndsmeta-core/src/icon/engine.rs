use tracing::debug;

use super::slot::{IconFrame, IconSlot, SEQUENCE_LEN};
use crate::error::{Error, Result};
use crate::rom::Banner;

/// Icons on one menu page
pub const ICON_SLOTS: usize = 39;

/// Banner animation playback for every icon on the menu
#[derive(Debug, Clone)]
pub struct IconAnimationEngine {
    slots: [IconSlot; ICON_SLOTS],
}

impl Default for IconAnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IconAnimationEngine {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| IconSlot::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        ICON_SLOTS
    }

    pub fn slot(&self, slot: usize) -> Result<&IconSlot> {
        self.slots.get(slot).ok_or(Error::SlotOutOfRange {
            slot,
            capacity: ICON_SLOTS,
        })
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut IconSlot> {
        self.slots.get_mut(slot).ok_or(Error::SlotOutOfRange {
            slot,
            capacity: ICON_SLOTS,
        })
    }

    /// Copy a token sequence into a slot.
    ///
    /// The slot keeps its cursor and delay counter, so a sequence loaded into
    /// a slot that was already playing continues from the same position.
    pub fn grab_banner_sequence(&mut self, slot: usize, tokens: &[u16; SEQUENCE_LEN]) -> Result<()> {
        self.slot_mut(slot)?.load(tokens);
        Ok(())
    }

    /// Load the sequence of an animated banner, or clear the slot for a static one
    pub fn grab_from_banner(&mut self, slot: usize, banner: &Banner) -> Result<()> {
        match banner.animation_sequence() {
            Some(tokens) => self.grab_banner_sequence(slot, &tokens),
            None => {
                debug!(
                    "Slot {}: banner version 0x{:04X} has no animation",
                    slot,
                    banner.version()
                );
                self.clear_banner_sequence(slot)
            }
        }
    }

    pub fn clear_banner_sequence(&mut self, slot: usize) -> Result<()> {
        self.slot_mut(slot)?.clear();
        Ok(())
    }

    /// Advance one slot by a display tick
    pub fn play_banner_sequence(&mut self, slot: usize) -> Result<IconFrame> {
        Ok(self.slot_mut(slot)?.tick())
    }

    /// Advance every slot by a display tick
    pub fn tick_all(&mut self) -> [IconFrame; ICON_SLOTS] {
        let mut frames = [IconFrame::default(); ICON_SLOTS];
        for (frame, slot) in frames.iter_mut().zip(self.slots.iter_mut()) {
            *frame = slot.tick();
        }
        frames
    }

    /// Frame decoded by the last tick of a slot
    pub fn frame(&self, slot: usize) -> Result<IconFrame> {
        Ok(self.slot(slot)?.frame())
    }

    /// Restart a slot's sequence from the first token
    pub fn reset_playback(&mut self, slot: usize) -> Result<()> {
        self.slot_mut(slot)?.rewind();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::FlipMode;
    use crate::rom::banner::sample_banner_bytes;
    use crate::rom::layout::banner;

    fn sequence(tokens: &[u16]) -> [u16; SEQUENCE_LEN] {
        let mut seq = [0u16; SEQUENCE_LEN];
        seq[..tokens.len()].copy_from_slice(tokens);
        seq
    }

    #[test]
    fn test_all_slots_start_neutral() {
        let engine = IconAnimationEngine::new();
        assert_eq!(engine.capacity(), 39);
        for slot in 0..ICON_SLOTS {
            assert_eq!(engine.frame(slot).unwrap(), IconFrame::default());
        }
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut engine = IconAnimationEngine::new();
        assert!(matches!(
            engine.play_banner_sequence(ICON_SLOTS),
            Err(Error::SlotOutOfRange {
                slot: 39,
                capacity: 39
            })
        ));
        assert!(engine.clear_banner_sequence(100).is_err());
        assert!(engine.grab_banner_sequence(39, &[0; SEQUENCE_LEN]).is_err());
    }

    #[test]
    fn test_slots_are_independent() {
        let mut engine = IconAnimationEngine::new();
        engine.grab_banner_sequence(0, &sequence(&[0x0300, 0x0500])).unwrap();
        engine.grab_banner_sequence(38, &sequence(&[0x0001, 0x0100])).unwrap();

        let frame = engine.play_banner_sequence(0).unwrap();
        assert_eq!(frame.row, 3);
        assert_eq!(engine.slot(0).unwrap().cursor(), 1);

        assert_eq!(engine.slot(38).unwrap().cursor(), 0);
        assert_eq!(engine.frame(38).unwrap(), IconFrame::default());
        assert_eq!(engine.slot(1).unwrap().cursor(), 0);
    }

    #[test]
    fn test_tick_all() {
        let mut engine = IconAnimationEngine::new();
        engine.grab_banner_sequence(5, &sequence(&[0x8401])).unwrap();
        let frames = engine.tick_all();
        assert_eq!(frames[5].row, 4);
        assert_eq!(frames[5].flip, FlipMode::Vertical);
        assert!(frames.iter().enumerate().all(|(i, f)| i == 5 || *f == IconFrame::default()));
    }

    #[test]
    fn test_grab_from_animated_banner() {
        let mut bytes = sample_banner_bytes(0x0103, "Anim");
        bytes[banner::ANIMATION_SEQUENCE..banner::ANIMATION_SEQUENCE + 2]
            .copy_from_slice(&0x4602u16.to_le_bytes());
        let banner = Banner::parse(&bytes).unwrap();

        let mut engine = IconAnimationEngine::new();
        engine.grab_from_banner(2, &banner).unwrap();
        let frame = engine.play_banner_sequence(2).unwrap();
        assert_eq!((frame.row, frame.flip), (6, FlipMode::Horizontal));
    }

    #[test]
    fn test_grab_from_static_banner_clears() {
        let mut engine = IconAnimationEngine::new();
        engine.grab_banner_sequence(1, &sequence(&[0x0701])).unwrap();

        let banner = Banner::parse(&sample_banner_bytes(1, "Static")).unwrap();
        engine.grab_from_banner(1, &banner).unwrap();
        assert!(engine.slot(1).unwrap().sequence().iter().all(|&t| t == 0));
    }

    #[test]
    fn test_reset_playback() {
        let mut engine = IconAnimationEngine::new();
        engine.grab_banner_sequence(0, &sequence(&[0x0001, 0x0202])).unwrap();
        engine.play_banner_sequence(0).unwrap();
        assert_eq!(engine.slot(0).unwrap().cursor(), 1);
        engine.reset_playback(0).unwrap();
        assert_eq!(engine.slot(0).unwrap().cursor(), 0);
    }
}
