//! Segmentation of one raw model response into user-visible content and an
//! ordered list of structured invocations.

use crate::{ArgMap, DescriptionTemplates, coerce_arguments, find_marked, match_standalone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub args: ArgMap,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub content: String,
    pub invocations: Vec<Invocation>,
}

#[derive(Default)]
pub struct ResponseParser {
    templates: DescriptionTemplates,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: DescriptionTemplates) -> Self {
        Self { templates }
    }

    pub fn templates_mut(&mut self) -> &mut DescriptionTemplates {
        &mut self.templates
    }

    /// Applies the three conventions in priority order: whole-response
    /// standalone call, standalone call lines, then `TOOL_CALL:`-marked
    /// calls embedded in narration. Only names present in `tools` are ever
    /// extracted; anything else stays plain text. Never fails.
    pub fn parse(&self, raw_text: &str, tools: &[ToolSpec]) -> ParseResult {
        if tools.is_empty() {
            return ParseResult {
                content: raw_text.to_string(),
                invocations: Vec::new(),
            };
        }

        let trimmed = raw_text.trim();
        let mut invocations = Vec::new();

        // The model produced only a call, no narration: substitute the
        // synthesized description so bare syntax never reaches the user.
        if let Some(call) = match_standalone(trimmed) {
            if is_registered(call.name, tools) {
                let args = coerce_arguments(call.raw_args);
                let content = self.templates.describe(call.name, &args);
                invocations.push(Invocation {
                    name: call.name.to_string(),
                    args,
                    id: call_id(0),
                });

                return ParseResult {
                    content,
                    invocations,
                };
            }
        }

        let mut pieces = Vec::new();
        for line in trimmed.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match match_standalone(line) {
                Some(call) if is_registered(call.name, tools) => {
                    let args = coerce_arguments(call.raw_args);
                    pieces.push(self.templates.describe(call.name, &args));
                    invocations.push(Invocation {
                        name: call.name.to_string(),
                        args,
                        id: call_id(invocations.len()),
                    });
                }
                _ => pieces.push(line.to_string()),
            }
        }

        let mut content = pieces.join(" ");

        // Marked calls are located in the original text (their arguments
        // may span the line joins above), then excised from the content.
        for call in find_marked(trimmed) {
            if !is_registered(call.name, tools) {
                continue;
            }

            let args = coerce_arguments(call.raw_args);
            invocations.push(Invocation {
                name: call.name.to_string(),
                args,
                id: call_id(invocations.len()),
            });
            content = excise(&content, call.text);
        }

        if invocations.is_empty() {
            return ParseResult {
                content: trimmed.to_string(),
                invocations,
            };
        }

        if content.is_empty() {
            let first = &invocations[0];
            content = self.templates.describe(&first.name, &first.args);
        }

        ParseResult {
            content,
            invocations,
        }
    }
}

fn is_registered(name: &str, tools: &[ToolSpec]) -> bool {
    tools.iter().any(|tool| tool.name == name)
}

fn call_id(index: usize) -> String {
    format!("call_{index}")
}

fn excise(content: &str, call_text: &str) -> String {
    let needle = normalize_lines(call_text);
    let Some(at) = content.find(&needle) else {
        return content.to_string();
    };

    let before = content[..at].trim_end();
    let after = content[at + needle.len()..].trim_start();

    match (before.is_empty(), after.is_empty()) {
        (true, true) => String::new(),
        (true, false) => after.to_string(),
        (false, true) => before.to_string(),
        (false, false) => format!("{before} {after}"),
    }
}

fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgValue;

    fn travel_tools() -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("search_flights", "Searches for flights between airports"),
            ToolSpec::new("book_hotel", "Books a hotel by ID"),
        ]
    }

    #[test]
    fn plain_narration_passes_through_with_no_invocations() {
        let parser = ResponseParser::new();
        let result = parser.parse("Happy to help with your trip!", &travel_tools());

        assert_eq!(result.content, "Happy to help with your trip!");
        assert!(result.invocations.is_empty());
    }

    #[test]
    fn empty_tool_set_disables_parsing_entirely() {
        let parser = ResponseParser::new();
        let raw = "book_hotel(hotel_id=123)";
        let result = parser.parse(raw, &[]);

        assert_eq!(result.content, raw);
        assert!(result.invocations.is_empty());
    }

    #[test]
    fn whole_response_standalone_call_becomes_description_and_invocation() {
        let parser = ResponseParser::new();
        let result = parser.parse(
            "search_flights(departure_airport='CDG', arrival_airport='LHR')",
            &travel_tools(),
        );

        assert_eq!(
            result.content,
            "I'll search for flights from CDG to LHR for you."
        );
        assert!(!result.content.contains('('));

        assert_eq!(result.invocations.len(), 1);
        let invocation = &result.invocations[0];
        assert_eq!(invocation.name, "search_flights");
        assert_eq!(invocation.id, "call_0");
        assert_eq!(
            invocation.args.get("departure_airport"),
            Some(&ArgValue::Text("CDG".to_string()))
        );
        assert_eq!(
            invocation.args.get("arrival_airport"),
            Some(&ArgValue::Text("LHR".to_string()))
        );
    }

    #[test]
    fn unregistered_call_shaped_text_is_preserved_as_content() {
        let parser = ResponseParser::new();
        let raw = "unknown_tool(x=1)";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.content, raw);
        assert!(result.invocations.is_empty());
    }

    #[test]
    fn standalone_call_lines_are_replaced_inline() {
        let parser = ResponseParser::new();
        let raw = "Let me look into that.\nbook_hotel(hotel_id=42)\nAnything else?";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(
            result.content,
            "Let me look into that. I'll book hotel ID 42 for you. Anything else?"
        );
        assert_eq!(result.invocations.len(), 1);
        assert_eq!(result.invocations[0].args.get("hotel_id"), Some(&ArgValue::Int(42)));
    }

    #[test]
    fn marked_call_is_excised_and_narration_kept() {
        let parser = ResponseParser::new();
        let raw = "I'll check that.\nTOOL_CALL: book_hotel(hotel_id=123)";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.content, "I'll check that.");
        assert!(!result.content.contains("TOOL_CALL"));

        assert_eq!(result.invocations.len(), 1);
        let invocation = &result.invocations[0];
        assert_eq!(invocation.name, "book_hotel");
        assert_eq!(invocation.id, "call_0");
        assert_eq!(invocation.args.get("hotel_id"), Some(&ArgValue::Int(123)));
    }

    #[test]
    fn multiple_marked_calls_keep_left_to_right_sequential_ids() {
        let parser = ResponseParser::new();
        let raw = "Flights first. TOOL_CALL: search_flights(departure_airport='CDG', arrival_airport='LHR') Then the hotel. TOOL_CALL: book_hotel(hotel_id=7) Done.";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.invocations.len(), 2);
        assert_eq!(result.invocations[0].name, "search_flights");
        assert_eq!(result.invocations[0].id, "call_0");
        assert_eq!(result.invocations[1].name, "book_hotel");
        assert_eq!(result.invocations[1].id, "call_1");

        assert_eq!(result.content, "Flights first. Then the hotel. Done.");
    }

    #[test]
    fn standalone_line_invocations_precede_marked_ones() {
        let parser = ResponseParser::new();
        let raw = "book_hotel(hotel_id=1)\nAlso flights. TOOL_CALL: search_flights(departure_airport='NCE', arrival_airport='ORY')";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.invocations.len(), 2);
        assert_eq!(result.invocations[0].name, "book_hotel");
        assert_eq!(result.invocations[0].id, "call_0");
        assert_eq!(result.invocations[1].name, "search_flights");
        assert_eq!(result.invocations[1].id, "call_1");

        assert_eq!(
            result.content,
            "I'll book hotel ID 1 for you. Also flights."
        );
    }

    #[test]
    fn marked_only_response_falls_back_to_first_description() {
        let parser = ResponseParser::new();
        let raw = "TOOL_CALL: book_hotel(hotel_id=9)";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.content, "I'll book hotel ID 9 for you.");
        assert_eq!(result.invocations.len(), 1);
    }

    #[test]
    fn unregistered_marked_calls_stay_in_the_content() {
        let parser = ResponseParser::new();
        let raw = "Let me try. TOOL_CALL: teleport(to='Mars')";
        let result = parser.parse(raw, &travel_tools());

        assert!(result.invocations.is_empty());
        assert_eq!(result.content, raw);
    }

    #[test]
    fn marked_call_spanning_lines_is_extracted_once() {
        let parser = ResponseParser::new();
        let raw = "On it.\nTOOL_CALL: search_flights(departure_airport='CDG',\narrival_airport='LHR')";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.invocations.len(), 1);
        assert_eq!(
            result.invocations[0].args.get("arrival_airport"),
            Some(&ArgValue::Text("LHR".to_string()))
        );
        assert_eq!(result.content, "On it.");
    }

    #[test]
    fn reparsing_synthesized_content_discovers_nothing_new() {
        let parser = ResponseParser::new();
        let tools = travel_tools();

        let first = parser.parse(
            "I'll check that.\nTOOL_CALL: book_hotel(hotel_id=123)",
            &tools,
        );
        let second = parser.parse(&first.content, &tools);

        assert!(second.invocations.is_empty());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn blank_lines_are_dropped_from_line_joined_content() {
        let parser = ResponseParser::new();
        let raw = "First thought.\n\n\nbook_hotel(hotel_id=2)\n\nSecond thought.";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(
            result.content,
            "First thought. I'll book hotel ID 2 for you. Second thought."
        );
        assert_eq!(result.invocations.len(), 1);
    }

    #[test]
    fn responses_without_invocations_keep_their_original_line_structure() {
        let parser = ResponseParser::new();
        let raw = "First thought.\n\nSecond thought.";
        let result = parser.parse(raw, &travel_tools());

        assert_eq!(result.content, raw);
        assert!(result.invocations.is_empty());
    }
}
