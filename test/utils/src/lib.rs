/// First reply from the booking service: a greeting with a couple of
/// cuisine chips and a submit chip.
pub fn greeting_response_fixture() -> &'static str {
    return r#"
{
  "conversationId": "conv-123",
  "messages": [
    {
      "role": "assistant",
      "text": "Hi! I can book you a table in Madrid.\nWhich cuisines do you fancy?",
      "suggestions": [
        { "title": "Italian", "action": { "clientOnly": true, "type": "toggle", "group": "cuisine", "value": "Italian" } },
        { "title": "Japanese", "action": { "clientOnly": true, "type": "toggle", "group": "cuisine", "value": "Japanese" } },
        { "title": "Done", "action": { "clientOnly": true, "type": "submit_cuisines" } },
        { "title": "Surprise me", "action": { "type": "surprise", "data": ["any"] } }
      ]
    }
  ]
}
"#
    .trim();
}

/// Reply sent once a table has been booked.
pub fn confirmation_response_fixture() -> &'static str {
    return r#"
{
  "conversationId": "conv-123",
  "messages": [
    { "role": "assistant", "text": "Booking confirmed for 4 at Trattoria Roma, 21:00.\nA confirmation email is on its way." }
  ]
}
"#
    .trim();
}
