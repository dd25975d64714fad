/// External (serializable) representations of walks and reports.
pub mod ext_repr;

/// All logic for converting external walk records into live sessions
pub mod import;

/// All logic for composing external reports from sessions
pub mod export;
