use std::sync::{Arc, Mutex};

use vchat::prelude::*;
use vprovider::GeneratorFuture;

#[derive(Debug)]
struct ScriptedGenerator {
    responses: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().map(String::from).collect()),
        }
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            self.responses
                .lock()
                .expect("responses lock")
                .pop()
                .ok_or_else(|| ProviderError::other("script exhausted"))
        })
    }
}

fn travel_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("search_flights", "Searches for flights between airports"),
        ToolSpec::new("book_hotel", "Books a hotel by ID"),
    ]
}

#[tokio::test]
async fn session_interprets_turns_and_accumulates_history() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        "I'll search for those flights.\nTOOL_CALL: search_flights(departure_airport='CDG', arrival_airport='LHR')",
        "book_hotel(hotel_id=123)",
    ]));
    let mut session = AssistantSession::new(generator);

    let first = session
        .send(TurnRequest::new("Flights from Paris to London, please").with_tools(travel_tools()))
        .await
        .expect("first turn should work");

    assert_eq!(first.content, "I'll search for those flights.");
    assert_eq!(first.invocations.len(), 1);
    assert_eq!(first.invocations[0].name, "search_flights");
    assert_eq!(first.invocations[0].id, "call_0");
    assert_eq!(
        first.invocations[0].args.get("departure_airport"),
        Some(&ArgValue::Text("CDG".to_string()))
    );

    let second = session
        .send(TurnRequest::new("Now book hotel 123").with_tools(travel_tools()))
        .await
        .expect("second turn should work");

    // The model answered with a bare call; the user still sees a sentence.
    assert_eq!(second.content, "I'll book hotel ID 123 for you.");
    assert_eq!(second.invocations.len(), 1);
    assert_eq!(
        second.invocations[0].args.get("hotel_id"),
        Some(&ArgValue::Int(123))
    );

    let history = session.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].text, "I'll search for those flights.");
    assert_eq!(history[3].text, "I'll book hotel ID 123 for you.");
}

#[tokio::test]
async fn session_without_tools_returns_raw_output_verbatim() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        "book_hotel(hotel_id=123)",
    ]));
    let mut session = AssistantSession::new(generator);

    let result = session
        .send(TurnRequest::new("Book hotel 123"))
        .await
        .expect("turn should work");

    assert_eq!(result.content, "book_hotel(hotel_id=123)");
    assert!(result.invocations.is_empty());
}
