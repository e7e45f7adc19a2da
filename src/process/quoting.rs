use anyhow::{bail, Result};

#[derive(Clone, Copy)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just saw a `"` inside a quoted field: either an escaped `""` or the close.
    QuoteInQuoted,
}

/// Strict quote check over the raw bytes of one record.
///
/// A `"` may only open a field, close it, or appear doubled inside a quoted
/// field. A quote inside an unquoted field, text after a closing quote, and
/// a quoted field left open all fail.
pub fn check_record(raw: &[u8]) -> Result<()> {
    let mut state = State::FieldStart;
    for (col, &b) in raw.iter().enumerate() {
        state = match (state, b) {
            (State::FieldStart, b'"') => State::Quoted,
            (State::Unquoted, b'"') => bail!("bare \" in non-quoted field at byte {}", col),
            (State::FieldStart | State::Unquoted, b',' | b'\n' | b'\r') => State::FieldStart,
            (State::FieldStart | State::Unquoted, _) => State::Unquoted,
            (State::Quoted, b'"') => State::QuoteInQuoted,
            (State::Quoted, _) => State::Quoted,
            (State::QuoteInQuoted, b'"') => State::Quoted,
            (State::QuoteInQuoted, b',' | b'\n' | b'\r') => State::FieldStart,
            (State::QuoteInQuoted, _) => {
                bail!("extraneous \" in quoted field at byte {}", col)
            }
        };
    }
    if let State::Quoted = state {
        bail!("quoted field is never closed");
    }
    Ok(())
}
