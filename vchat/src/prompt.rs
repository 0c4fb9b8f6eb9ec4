//! Instruction-block assembly for the generation collaborator.

use crate::TurnRequest;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful and friendly AI customer support assistant. \
Always respond with natural, conversational language. \
Explain what you're doing in a helpful way.";

// The format contract between these instructions and the response parser:
// the model is told to narrate first and mark calls with TOOL_CALL:.
const FORMAT_INSTRUCTIONS: &str = "\n\nIMPORTANT: When you need to use a tool, ALWAYS:\n\
1. First provide a helpful natural language response explaining what you're doing\n\
2. Then call the tool using this format: TOOL_CALL: tool_name(arg1='value1', arg2='value2')\n\
\nExamples:\n\
User: 'Search for flights from Paris to London'\n\
Assistant: I'll search for flights from Paris to London for you.\n\
TOOL_CALL: search_flights(departure_airport='CDG', arrival_airport='LHR')\n\
\nUser: 'Book hotel 123'\n\
Assistant: I'll book hotel ID 123 for you right away.\n\
TOOL_CALL: book_hotel(hotel_id=123)\n\
\nNEVER respond with just a bare function call. Always include helpful natural language.";

pub(crate) fn build_instructions(request: &TurnRequest) -> String {
    let mut system_prompt = request
        .system_prompt
        .clone()
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    if !request.tools.is_empty() {
        system_prompt.push_str("\n\nYou have access to these tools:\n");
        for tool in &request.tools {
            system_prompt.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }

        system_prompt.push_str(FORMAT_INSTRUCTIONS);
    }

    let mut instructions = format!("System: {system_prompt}\n\n");
    if let Some(history) = &request.history {
        instructions.push_str(history);
    }

    instructions.push_str(&format!("User: {}\nAssistant: ", request.prompt));
    instructions
}
