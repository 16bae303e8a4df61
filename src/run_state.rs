//! Run-wide progression state
//!
//! One [`RunState`] lives for the whole play session and is threaded
//! explicitly into `sim::tick`; nothing in the crate reaches for global
//! state. It owns HP, the per-level checkpoint, and level unlock /
//! selection. Only the unlock level survives the process (via the
//! profile); HP is session-local on purpose.

use crate::persistence::Profile;

/// HP, checkpoint and level-unlock bookkeeping for one play session
#[derive(Debug, Clone)]
pub struct RunState {
    current_hp: u32,
    max_hp: u32,
    /// HP held when the current level was entered; restarts roll back to it
    level_start_hp: u32,
    highest_unlocked_level: u32,
    selected_level: u32,
    level_count: u32,
}

impl RunState {
    /// Fresh run: full HP, only the first level unlocked.
    pub fn new(max_hp: u32, level_count: u32) -> Self {
        Self {
            current_hp: max_hp,
            max_hp,
            level_start_hp: max_hp,
            highest_unlocked_level: 1,
            selected_level: 1,
            level_count,
        }
    }

    /// Session start from a persisted profile: the unlock level carries
    /// over (clamped to the level count), HP starts full regardless.
    pub fn from_profile(profile: &Profile, max_hp: u32, level_count: u32) -> Self {
        let mut run = Self::new(max_hp, level_count);
        run.highest_unlocked_level = profile.highest_unlocked_level.clamp(1, level_count);
        run
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn level_start_hp(&self) -> u32 {
        self.level_start_hp
    }

    pub fn highest_unlocked_level(&self) -> u32 {
        self.highest_unlocked_level
    }

    pub fn selected_level(&self) -> u32 {
        self.selected_level
    }

    pub fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Apply damage, flooring at zero. Returns how much was actually dealt.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Heal toward the cap. Returns how much was actually restored; zero
    /// means the heal was wasted at full HP.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// Back to full HP for a fresh run (menu, new game).
    pub fn reset_hp(&mut self) {
        self.current_hp = self.max_hp;
        self.level_start_hp = self.max_hp;
    }

    /// Snapshot HP on level entry. Restarts roll back to this value, not
    /// to full health.
    pub fn save_checkpoint(&mut self) {
        self.level_start_hp = self.current_hp;
    }

    /// Roll HP back to the last checkpoint.
    pub fn restore_checkpoint(&mut self) {
        self.current_hp = self.level_start_hp;
    }

    /// Raise the unlock level, clamped to the level count. Monotone:
    /// replaying an old level can never lower it. Returns whether anything
    /// actually changed.
    pub fn unlock_through(&mut self, level: u32) -> bool {
        let clamped = level.min(self.level_count);
        if clamped > self.highest_unlocked_level {
            self.highest_unlocked_level = clamped;
            true
        } else {
            false
        }
    }

    /// Pick a level for play; rejects anything not yet unlocked.
    pub fn select_level(&mut self, level: u32) -> bool {
        if level >= 1 && level <= self.highest_unlocked_level {
            self.selected_level = level;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_floors_at_zero() {
        let mut run = RunState::new(3, 5);
        assert_eq!(run.take_damage(1), 1);
        assert_eq!(run.take_damage(5), 2);
        assert_eq!(run.current_hp(), 0);
        assert_eq!(run.take_damage(1), 0);
    }

    #[test]
    fn test_heal_caps_and_reports_waste() {
        let mut run = RunState::new(3, 5);
        assert_eq!(run.heal(1), 0, "heal at full HP is wasted");
        run.take_damage(2);
        assert_eq!(run.heal(1), 1);
        assert_eq!(run.heal(5), 1);
        assert_eq!(run.current_hp(), 3);
    }

    /// Enter a level at partial HP, get hurt, fail, restart: HP comes back
    /// to the entry value, not to full.
    #[test]
    fn test_checkpoint_rolls_back_to_entry_hp() {
        let mut run = RunState::new(3, 5);
        run.take_damage(1);

        // Entering the level snapshots 2 HP
        run.save_checkpoint();
        run.take_damage(2);
        assert_eq!(run.current_hp(), 0);

        run.restore_checkpoint();
        assert_eq!(run.current_hp(), 2);
        assert_eq!(run.level_start_hp(), 2);
    }

    /// Full HP arithmetic over a run: three hits, a heal, and a heal
    /// wasted at the cap.
    #[test]
    fn test_run_hp_arithmetic() {
        let mut run = RunState::new(5, 5);
        for _ in 0..3 {
            run.take_damage(1);
        }
        assert_eq!(run.current_hp(), 2);
        assert_eq!(run.heal(1), 1);
        assert_eq!(run.current_hp(), 3);
        run.heal(2);
        assert_eq!(run.heal(1), 0, "heal at max HP reports zero healed");
        assert_eq!(run.current_hp(), 5);
    }

    #[test]
    fn test_checkpoint_survives_multiple_restarts() {
        let mut run = RunState::new(3, 5);
        run.save_checkpoint();
        for _ in 0..4 {
            run.take_damage(3);
            run.restore_checkpoint();
        }
        assert_eq!(run.current_hp(), 3);
    }

    /// Replaying an already-beaten level never lowers the unlock.
    #[test]
    fn test_unlock_is_monotone() {
        let mut run = RunState::new(3, 5);
        assert!(run.unlock_through(2));
        assert!(run.unlock_through(4));
        assert!(!run.unlock_through(2), "stale unlock must be a no-op");
        assert_eq!(run.highest_unlocked_level(), 4);
    }

    #[test]
    fn test_unlock_clamps_to_level_count() {
        let mut run = RunState::new(3, 3);
        run.unlock_through(3);
        assert!(!run.unlock_through(4), "nothing past the last level");
        assert_eq!(run.highest_unlocked_level(), 3);
    }

    #[test]
    fn test_select_requires_unlock() {
        let mut run = RunState::new(3, 5);
        assert!(!run.select_level(2));
        assert_eq!(run.selected_level(), 1);
        run.unlock_through(3);
        assert!(run.select_level(3));
        assert_eq!(run.selected_level(), 3);
        assert!(!run.select_level(0));
    }

    #[test]
    fn test_profile_restores_unlock_but_not_hp() {
        let mut profile = Profile::default();
        profile.highest_unlocked_level = 4;
        let mut run = RunState::from_profile(&profile, 3, 5);
        assert_eq!(run.highest_unlocked_level(), 4);
        assert_eq!(run.current_hp(), 3, "HP never persists");

        // A profile from a build with more levels clamps down
        profile.highest_unlocked_level = 40;
        run = RunState::from_profile(&profile, 3, 5);
        assert_eq!(run.highest_unlocked_level(), 5);
    }

    #[test]
    fn test_reset_hp_refills() {
        let mut run = RunState::new(3, 5);
        run.take_damage(2);
        run.save_checkpoint();
        run.reset_hp();
        assert_eq!(run.current_hp(), 3);
        assert_eq!(run.level_start_hp(), 3);
    }
}
