/// Rendering: widgets read `AppState` and its views, and only mutate the
/// filter selections and load/export requests.
pub mod panels;
pub mod plot;
pub mod table;
