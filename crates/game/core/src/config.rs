/// Combat formula constants.
///
/// These values are part of the rules contract: replays and tests depend on
/// them, so they are associated constants rather than runtime settings.
/// Percentages are expressed as whole numbers and compared with integer
/// arithmetic, so no threshold ever depends on floating point rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatConfig;

impl CombatConfig {
    // ===== actions =====
    /// Health restored by every heal decision.
    pub const HEAL_AMOUNT: i32 = 30;

    // ===== damage strategies =====
    /// Mana deducted by a magic attack.
    pub const MAGIC_MANA_COST: i32 = 10;
    /// Every this-many points of current mana add one point of magic damage.
    pub const MAGIC_MANA_PER_BONUS: i32 = 10;
    /// Ranged attacks deal a critical bonus below this health percentage (strict).
    pub const RANGED_CRITICAL_PERCENT: i64 = 30;

    // ===== attack sequences =====
    /// Power attack bonus is `attack_power / POWER_ATTACK_DIVISOR`.
    pub const POWER_ATTACK_DIVISOR: i32 = 4;
    /// Power attack recoil is this percentage of the attacker's max health.
    pub const POWER_ATTACK_RECOIL_PERCENT: i32 = 10;

    // ===== fixed-rule decisions =====
    /// A combatant heals itself below this health percentage (strict).
    pub const SELF_HEAL_PERCENT: i64 = 30;
    /// A combatant heals an ally below this health percentage (strict).
    pub const ALLY_RESCUE_PERCENT: i64 = 20;
}
