//! Natural-language prompt construction.
//!
//! [`build_prompt`] is a pure transform from one scene plus its
//! project's mood settings (and an optionally resolved character) to
//! the single prompt string handed to the external generation surface.
//! It performs no I/O and is byte-for-byte deterministic given its
//! inputs, which the dispatch and runner tests rely on.

use std::sync::LazyLock;

use regex::Regex;

use crate::character::Character;
use crate::project::Project;
use crate::scene::Scene;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Opening style tag used when the project sets no style of its own.
pub const DEFAULT_STYLE_TAG: &str = "Cinematic film still";

/// Phrase substituted when a scene resolves no character.
pub const GENERIC_CHARACTER_PHRASE: &str = "a character";

/// Closing quality tag appended to every prompt.
pub const QUALITY_TAG: &str = "high quality, detailed";

/// Matches a trailing parenthetical annotation, e.g. `" (มุมกว้าง)"`.
/// Option strings in the settings UI carry a bilingual suffix that must
/// not leak into the prompt.
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Annotation stripping
// ---------------------------------------------------------------------------

/// Remove parenthetical bilingual annotations from an option string.
///
/// `"Wide Shot (มุมกว้าง)"` becomes `"Wide Shot"`. Strings without an
/// annotation pass through trimmed but otherwise unchanged.
pub fn strip_annotation(value: &str) -> String {
    ANNOTATION_RE.replace_all(value, "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Prompt builder
// ---------------------------------------------------------------------------

/// Build the final prompt for one scene.
///
/// Clauses are concatenated in fixed order: style tag, shot type,
/// character description (or the generic phrase), action, setting with
/// environment elements, weather/atmosphere/lighting, intensity
/// adjective, quoted dialogue, closing quality/tone tag. Empty inputs
/// drop their clause rather than emitting filler.
pub fn build_prompt(scene: &Scene, project: &Project, character: Option<&Character>) -> String {
    let settings = &project.settings;
    let mut clauses: Vec<String> = Vec::new();

    let style = strip_annotation(&settings.style);
    if style.is_empty() {
        clauses.push(DEFAULT_STYLE_TAG.to_string());
    } else {
        clauses.push(format!("{DEFAULT_STYLE_TAG} in {style} style"));
    }

    let shot = strip_annotation(&scene.shot_type);
    if !shot.is_empty() {
        clauses.push(shot);
    }

    let subject = match character {
        Some(c) if !c.visual_description.trim().is_empty() => c.visual_description.trim().to_string(),
        _ => GENERIC_CHARACTER_PHRASE.to_string(),
    };
    if scene.action.trim().is_empty() {
        clauses.push(subject);
    } else {
        clauses.push(format!("{subject} {}", scene.action.trim()));
    }

    let setting = scene.setting.trim();
    let elements = scene
        .environment_elements
        .iter()
        .map(|e| strip_annotation(e))
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    match (setting.is_empty(), elements.is_empty()) {
        (false, false) => clauses.push(format!("in {setting}, with {elements}")),
        (false, true) => clauses.push(format!("in {setting}")),
        (true, false) => clauses.push(format!("with {elements}")),
        (true, true) => {}
    }

    let mood = [&settings.weather, &settings.atmosphere, &settings.lighting]
        .iter()
        .map(|v| strip_annotation(v))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !mood.is_empty() {
        clauses.push(mood);
    }

    // Only the first word of the tier label is embedded.
    let adjective = settings
        .intensity_label()
        .split_whitespace()
        .next()
        .unwrap_or_default();
    clauses.push(format!("{adjective} mood"));

    if let Some(dialogue) = scene.dialogue.as_deref() {
        if !dialogue.trim().is_empty() {
            clauses.push(format!("saying \"{}\"", dialogue.trim()));
        }
    }

    let tone = strip_annotation(&settings.tone);
    if tone.is_empty() {
        clauses.push(QUALITY_TAG.to_string());
    } else {
        clauses.push(format!("{QUALITY_TAG}, {tone} tone"));
    }

    clauses.join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
