pub mod pad;
pub mod persistence;
pub mod presets;
