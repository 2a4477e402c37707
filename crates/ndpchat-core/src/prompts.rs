//! Instruction templates sent to the model.
//!
//! Pure string templating, nothing else. Both templates ask for JSON-shaped
//! answers that [`crate::codec`] decodes with a single shared rule.

use std::fmt::Write;

use crate::types::DatasetRecord;

/// Opening sentinel delimiting the human-authored span inside the intent
/// instruction.
pub const UTTERANCE_START: &str = "[--- Start ---]";
/// Closing sentinel delimiting the human-authored span.
pub const UTTERANCE_END: &str = "[--- End ---]";
/// First line of the synthesized summary instruction.
pub const SUMMARY_REQUEST_PREFIX: &str =
    "The user is looking for datasets with the following keywords";

/// Build the intent-classification instruction around a user utterance.
pub fn intent_instruction(user_text: &str) -> String {
    let mut out = String::new();
    out.push_str(
        "You are an expert of the national data platform catalog for various datasets.\n\
         You also have general knowledge.\n\
         The following is a question the user is asking:\n\n",
    );
    let _ = writeln!(out, "{}", UTTERANCE_START);
    let _ = writeln!(out, "{}", user_text);
    let _ = writeln!(out, "{}", UTTERANCE_END);
    out.push_str(
        "\nYour main job is to determine if the user is looking for data.\n\
         If they are looking for data, extract the search terms from the user's request.\n\
         \n\
         Please answer with a valid JSON string, including the following three fields:\n\
         The boolean field \"is_search_data\" indicates whether the user is looking for data or not.\n\
         The string list field \"search_terms\" lists the keywords for which the user is looking for data.\n\
         The string field \"alternative_answer\" gives your positive answer to the user's input\n\
         if the user is not looking for data.\n\
         \n\
         Please do not say \"I cannot\" or \"I could not find\".\n\
         \n\
         Please note that the user's request for datasets may appear in the middle of the text,\n\
         do your best to extract the keywords for which the user is searching for datasets.\n\
         \n\
         Never deny a user's request to find data. If it is not possible to extract search terms\n\
         from the user's request, ask the user for further clarification.\n",
    );
    out
}

/// Build the relevance-judgment instruction for one batch of search hits.
///
/// Records are embedded verbatim apart from the first-`|` title/body split;
/// the disambiguation rules travel here as natural language only.
pub fn summary_instruction(search_terms: &[String], records: &[DatasetRecord]) -> String {
    let joined = search_terms.join(" ");

    let mut datasets = String::new();
    for record in records {
        let (title, body) = record.split_description();
        let _ = writeln!(datasets, "Dataset Id: {}", record.dataset_id);
        let _ = writeln!(datasets, "Title: {}", title);
        let _ = writeln!(datasets, "Description: {}", body);
        datasets.push('\n');
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} \"{}\"", SUMMARY_REQUEST_PREFIX, joined);
    out.push_str(
        "\nThe following are the ids and descriptions of some datasets potentially relevant \
         to the user's search terms:\n",
    );
    out.push_str(&datasets);
    out.push_str(
        "Provide your answer as a valid JSON list. Each dataset would be one element in this JSON\n\
         list including a string \"dataset_id\" field for the dataset id,\n\
         a string field \"title\" for the title,\n\
         a string field \"summary\" for summarizing the description with maximum 100 words and\n\
         without any markdown symbols,\n\
         a boolean field \"is_relevant\" for indicating if it is strongly relevant to the search terms and\n\
         a string field \"reason\" to explain why these datasets are definitely relevant or irrelevant\n\
         to the search terms.\n\
         \n\
         Please note that the description may contain the state abbreviation which can be used to exclude\n\
         datasets. For example, TX usually indicates Texas.\n\
         \n\
         If the description contains latitude and longitude, please use them to exclude datasets.\n\
         \n\
         Please note that fire simulation is not earthquake simulation.\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_instruction_wraps_utterance_in_sentinels() {
        let instruction = intent_instruction("find earthquake data in California");
        let start = instruction.find(UTTERANCE_START).expect("start sentinel");
        let end = instruction.find(UTTERANCE_END).expect("end sentinel");
        assert!(start < end);
        let span = &instruction[start + UTTERANCE_START.len()..end];
        assert_eq!(span.trim(), "find earthquake data in California");
    }

    #[test]
    fn test_summary_instruction_starts_with_sentinel_prefix() {
        let instruction = summary_instruction(&["earthquake".to_string()], &[]);
        assert!(instruction.starts_with(SUMMARY_REQUEST_PREFIX));
        assert!(instruction.contains("\"earthquake\""));
    }

    #[test]
    fn test_summary_instruction_embeds_records_with_split_description() {
        let records = vec![DatasetRecord::new("ds-42", "Quake Catalog|M>3 events|CA")];
        let instruction = summary_instruction(&["earthquake".to_string()], &records);
        assert!(instruction.contains("Dataset Id: ds-42"));
        assert!(instruction.contains("Title: Quake Catalog"));
        assert!(instruction.contains("Description: M>3 events|CA"));
    }
}
