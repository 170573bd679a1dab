//! LLM prompts for the name-harvesting pipeline.
//!
//! The naming criteria and output-field requirements are content policy:
//! the pipeline passes them through opaquely and never interprets them.

/// Task prompt appended to each batch of source text.
///
/// `{source_ref}` is replaced with the human-readable chapter reference.
pub const TASK_PROMPT: &str = r#"You are a Sanskrit expert interested in identifying beautiful names that are
in Sanskrit. The above input comes from the following reference: {source_ref},
with all the Sanskrit verses transliterated, word-to-word Sanskrit-to-English
translations, verse translations, and purports. Your task is to find all
relevant Sanskrit names from the above text. These names will be used by
someone who gives new names to people of all ages looking to be initiated
into the disciplic succession of ISKCON, so feel free to include names of
any and all lengths. HOWEVER, you MUST make sure to follow the given
criteria for names.

{exclusions}

The following is the criteria for the names:

Names of Krishna
Names of Krishna's incarnations (ex. names of Caitanya, Balaram, Rama, etc.)
Names of Krishna's male devotees (ex. acaryas, etc.)
Names of Krishna's female devotees (ex. gopis, radha, etc.)
Names of Krishna's animals and pets (ex. hamsi, etc.)
Qualities of Krishna (ex. face, feet, kindness, mercy, etc.)
Qualities of Krishna's devotees (ex. desire-fulfilling trees, etc.)
Qualities of bhakti and devotional practice (ex. prema, etc.)
Names of books (ex. gopala-campu)
Names of holy places (ex. vrindavan, etc.)

Your output must include the name, definition, context around the name,
the verse number as reference, the criteria category, AND the gender
(male/female/neutral). For example:

"Vāsudeva
Definition: Son of Vasudeva; the divine son of Vasudeva and Devakī
Context: This is the primary name invoked in the opening verse of
Śrīmad-Bhāgavatam. The name indicates both Krishna's earthly parentage and
His divine nature. It's used in the invocation "oṁ namo bhagavate vāsudevāya"
(I offer my obeisances unto the Personality of Godhead, Vāsudeva).
Reference: SB 1.1.1, 1.1.12 Purport, 1.1.19
Category: Names of Krishna
Gender: Male"

Note how the name is first, and the definition, context, references, and so
on and so forth are all thoroughly provided below. Make sure to be especially
comprehensive in any context that you find for the name. Also, make sure to
extract ALL names, and DO NOT SKIP ANY, since you are very, very interested
in learning all of the names according to the criteria. Lastly, make sure to
present the name as the name itself in the correct Sanskrit declension, the
nominative case."#;

/// Exclusion block template, included when prior names exist for the chapter.
pub const EXCLUSION_BLOCK: &str = r#"IMPORTANT: DO NOT include any of the following names that have already been found:

{names}

Please find ONLY NEW names that are not in the above list."#;

/// Follow-up prompt for the continuation round.
pub const CONTINUATION_PROMPT: &str = r#"The above is the first response. Now, please continue to find more names
from the same source text, {source_ref}, that you have not already found.
Make sure to follow the same criteria as before, and DO NOT repeat any names
that you have already found in the first response. Format your output exactly
as before, with the name first, followed by the definition, context,
references, category. Then, add these to the previous response, so that you
have a comprehensive list of all the names you have found so far."#;

/// Build the exclusion block enumerating every excluded name.
///
/// Empty when there is nothing to exclude, so the task prompt carries no
/// stray header on a fresh chapter.
pub fn exclusion_block(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }

    EXCLUSION_BLOCK.replace("{names}", &names.join(", "))
}

/// Build the opening (round 1) prompt: batch text first, task after, the
/// way the source text is presented "above" the instruction.
pub fn opening_prompt(batch_text: &str, source_ref: &str, exclusions: &[String]) -> String {
    let task = TASK_PROMPT
        .replace("{source_ref}", source_ref)
        .replace("{exclusions}", &exclusion_block(exclusions));

    format!("{} \n\n {}", batch_text, task)
}

/// Build the continuation (round 2) prompt.
pub fn continuation_prompt(source_ref: &str) -> String {
    CONTINUATION_PROMPT.replace("{source_ref}", source_ref)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_prompt_embeds_batch_and_reference() {
        let prompt = opening_prompt(
            "TEXT 1 om namo bhagavate",
            "Srimad Bhagavatam, Canto 1, Chapter 1",
            &[],
        );

        assert!(prompt.starts_with("TEXT 1 om namo bhagavate"));
        assert!(prompt.contains("Srimad Bhagavatam, Canto 1, Chapter 1"));
        assert!(!prompt.contains("{source_ref}"));
        assert!(!prompt.contains("{exclusions}"));
        assert!(!prompt.contains("already been found"));
    }

    #[test]
    fn test_exclusion_block_enumerates_every_name() {
        let names = vec!["Govinda".to_string(), "Mādhava".to_string()];
        let block = exclusion_block(&names);

        assert!(block.contains("Govinda, Mādhava"));
        assert!(block.contains("ONLY NEW names"));
    }

    #[test]
    fn test_opening_prompt_with_exclusions() {
        let names = vec!["Govinda".to_string()];
        let prompt = opening_prompt("batch", "ref", &names);

        assert!(prompt.contains("DO NOT include any of the following names"));
        assert!(prompt.contains("Govinda"));
    }

    #[test]
    fn test_continuation_prompt_names_the_source() {
        let prompt = continuation_prompt("Srimad Bhagavatam, Canto 5, Chapter 2");

        assert!(prompt.contains("continue to find more names"));
        assert!(prompt.contains("Srimad Bhagavatam, Canto 5, Chapter 2"));
        assert!(!prompt.contains("{source_ref}"));
    }
}
