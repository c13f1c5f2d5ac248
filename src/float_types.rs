// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Default classification tolerance, used by [`BooleanConfig::default`](crate::boolean::BooleanConfig).
///
/// Every plane-classification and split call takes the tolerance as an explicit
/// parameter instead of reading a global, so callers may pass arbitrarily small
/// values (e.g. `1e-8`) per operation without affecting other calls.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;

/// Default classification tolerance, used by [`BooleanConfig::default`](crate::boolean::BooleanConfig).
///
/// Every plane-classification and split call takes the tolerance as an explicit
/// parameter instead of reading a global, so callers may pass arbitrarily small
/// values (e.g. `1e-8`) per operation without affecting other calls.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-5;
