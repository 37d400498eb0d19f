/// Tabulated mean atomic volumes at 298 K (Hofmann, Acta Cryst. B58, 2002, 489-493).
/// Built-in table for H..Fm, loadable from and savable to JSON so a user can supply
/// their own values. Elements without a volume are kept as explicitly undefined.
pub mod hofmann_table;
/// Temperature-corrected additive volume, the 18 Å rule estimate, density and
/// per-fragment volumes.
pub mod volume_calc;
