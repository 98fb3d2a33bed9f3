//! Expert personas and their prompt templates.
//!
//! A persona is the expert viewpoint the user picks for the summary. The
//! set is closed: anything outside the two variants is unrepresentable,
//! so template selection is a total function and downstream code never
//! sees an unbound template.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Psychologist,
    Educator,
}

impl Persona {
    /// All personas, in the order they are offered to the user.
    /// The first entry is the default selection.
    pub const ALL: [Persona; 2] = [Persona::Psychologist, Persona::Educator];

    /// Human-readable label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Psychologist => "Psychologist",
            Persona::Educator => "Educator",
        }
    }

    /// Select the prompt template for this persona.
    pub fn template(&self) -> &'static PromptTemplate {
        match self {
            Persona::Psychologist => &PSYCHOLOGIST_TEMPLATE,
            Persona::Educator => &EDUCATOR_TEMPLATE,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Persona {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "psychologist" => Ok(Persona::Psychologist),
            "educator" => Ok(Persona::Educator),
            other => Err(Error::invalid_request(format!(
                "Unknown persona '{}' (expected 'psychologist' or 'educator')",
                other
            ))),
        }
    }
}

/// A fixed prompt skeleton with two named slots: `{title}` and `{content}`.
#[derive(Debug)]
pub struct PromptTemplate {
    pub persona: Persona,
    pub template: &'static str,
}

impl PromptTemplate {
    /// Fill both slots, producing a complete prompt.
    pub fn fill(&self, title: &str, content: &str) -> String {
        self.template
            .replace("{title}", title)
            .replace("{content}", content)
    }
}

static PSYCHOLOGIST_TEMPLATE: PromptTemplate = PromptTemplate {
    persona: Persona::Psychologist,
    template: "\
Below is information gathered from the web about the fairy tale \"{title}\".

Based on it, as a psychologist, summarize the story with a focus on the \
mental states and emotional journeys of the characters, in a way an \
elementary-school child can understand. Explain it in the voice of a kindly \
old professor.

Information:
{content}

Summary:
",
};

static EDUCATOR_TEMPLATE: PromptTemplate = PromptTemplate {
    persona: Persona::Educator,
    template: "\
Below is information gathered from the web about the fairy tale \"{title}\".

Based on it, as an educator, summarize the story highlighting the lessons \
and morals children can take from it, in a way an elementary-school child \
can understand. Explain it in the voice of a friendly older sibling.

Information:
{content}

Summary:
",
};

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_count(template: &str, slot: &str) -> usize {
        template.matches(slot).count()
    }

    #[test]
    fn test_templates_have_exactly_two_slots() {
        for persona in Persona::ALL {
            let t = persona.template();
            assert_eq!(slot_count(t.template, "{title}"), 1, "{}", persona);
            assert_eq!(slot_count(t.template, "{content}"), 1, "{}", persona);
        }
    }

    #[test]
    fn test_templates_carry_persona_tone() {
        let psych = Persona::Psychologist.template();
        assert!(psych.template.contains("psychologist"));
        assert!(psych.template.contains("old professor"));

        let educ = Persona::Educator.template();
        assert!(educ.template.contains("educator"));
        assert!(educ.template.contains("older sibling"));
    }

    #[test]
    fn test_template_selection_is_idempotent() {
        for persona in Persona::ALL {
            let a = persona.template();
            let b = persona.template();
            assert_eq!(a.persona, b.persona);
            assert_eq!(a.template, b.template);
        }
    }

    #[test]
    fn test_fill_substitutes_both_slots() {
        let prompt = Persona::Educator
            .template()
            .fill("Cinderella", "a girl and a glass slipper");
        assert!(prompt.contains("Cinderella"));
        assert!(prompt.contains("a girl and a glass slipper"));
        assert!(!prompt.contains("{title}"));
        assert!(!prompt.contains("{content}"));
    }

    #[test]
    fn test_persona_from_str() {
        assert_eq!("psychologist".parse::<Persona>().unwrap(), Persona::Psychologist);
        assert_eq!("Educator".parse::<Persona>().unwrap(), Persona::Educator);
        assert!("philosopher".parse::<Persona>().is_err());
    }
}
