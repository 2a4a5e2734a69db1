pub mod chord;
pub mod demo;
pub mod error;
pub mod interval;
pub mod note;
pub mod passage;
pub mod playback;
pub mod scale;
pub mod tempo;

pub use chord::{Chord, Quality};
pub use demo::Demo;
pub use error::*;
pub use interval::Interval;
pub use note::{Accidental, Letter, Note};
pub use passage::{Passage, Step};
pub use playback::{PlaybackEvent, Sequence};
pub use scale::{Degree, Scale, ScaleType};
pub use tempo::{NoteValue, Tempo, TimeSignature};

/// Render a passage YAML document to a playback schedule.
/// This is the main entry point for the library.
pub fn render_passage(source: &str) -> Result<Sequence> {
    let passage = Passage::from_yaml(source)?;
    passage.render()
}

/// Render a schedule as YAML (a list of camelCase events under `events`)
pub fn schedule_to_yaml(sequence: &Sequence) -> Result<String> {
    serde_yaml::to_string(sequence).map_err(|e| TheoryError::ConfigError(e.to_string()))
}
