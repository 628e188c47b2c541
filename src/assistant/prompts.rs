// * Prompt construction for the chat and summary collaborators

use crate::ingest::record::InnovationRecord;

/// System instruction for the chat assistant, embedding the raw NDJSON dataset
pub fn system_instruction(context: &str) -> String {
    format!(
        r#"You are an AI assistant for the CGIAR Multifunctional Landscapes (MFL) platform.
You have access to the following dataset (newline-delimited JSON) describing agricultural innovations:

{context}

The main fields in each record are:
- "Innovation/ Technology/ Tool": Name of the solution/innovation.
- "Type of Innovation / Technology/ Tool": Category (e.g., Technical, Socio-technical, Socio-economic).
- "Scale": The operational scale (e.g., Plot, Farm, Community, Landscape, Multiscale, National).
- "Production system": The agricultural context.
- "Country": Implementation location.
- "Challenge it was addressing": The problem the innovation addresses.
- "Centre (s) involved": The CGIAR center(s) involved.
- "Data collected": Information about what data was gathered.
- "Site": Specific location details.
- "Focal Point": Contact person for the innovation.

Answer strictly from this data.
- For summaries, synthesize the records above.
- For a specific country or innovation, look it up in the records above.
- If the answer is not in the data, say that you don't have that information.
- Keep answers concise and format lists clearly."#
    )
}

/// One line per record: `- <name> (<type>, <country>): <description>`
pub fn summary_context(records: &[&InnovationRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "- {} ({}, {}): {}",
                r.innovation, r.type_of_innovation, r.country, r.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking for a 2-3 sentence synthesis of the filtered records
pub fn summary_prompt(records: &[&InnovationRecord]) -> String {
    format!(
        "Analyze the following list of agricultural innovations and provide a concise 2-3 sentence summary.\n\
         Focus on the dominant types of technologies, the regional distribution, and the primary production systems targeted.\n\
         \n\
         Data:\n{}",
        summary_context(records)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_embeds_context() {
        let prompt = system_instruction("{\"Country\":\"Kenya\"}");
        assert!(prompt.contains("{\"Country\":\"Kenya\"}"));
        assert!(prompt.contains("Centre (s) involved"));
    }

    #[test]
    fn test_summary_lines() {
        let record = InnovationRecord {
            innovation: "Biochar".to_string(),
            type_of_innovation: "Technical".to_string(),
            country: "Kenya".to_string(),
            description: "Challenge: Soil fertility".to_string(),
            ..Default::default()
        };
        let prompt = summary_prompt(&[&record]);

        assert!(prompt.contains("- Biochar (Technical, Kenya): Challenge: Soil fertility"));
        assert!(prompt.starts_with("Analyze the following"));
    }
}
