use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

const COUNT_CLASS: &str = "signature-count-number";

#[derive(Debug, Error)]
pub enum CountError {
    #[error("no signature count element in document")]
    CountNotFound,
    #[error("signature count text is not a number: {0:?}")]
    InvalidCount(String),
    #[error("markup scan failed: {0}")]
    Markup(#[from] quick_xml::Error),
}

/// Scan state. `Done` is absorbing: once a count has been read, every
/// later event is ignored, so a duplicated element cannot change the
/// result.
enum Scan {
    Searching,
    Armed,
    Done(u64),
}

/// Single pass over the markup stream, returning the integer inside the
/// first `<p class="signature-count-number">` element.
pub fn scan_count(html: &str) -> Result<u64, CountError> {
    let mut reader = Reader::from_str(html);
    // Petition snapshots are HTML, not XML: void elements go unclosed and
    // nesting is not guaranteed to balance.
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut state = Scan::Searching;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => on_open(&mut state, &e)?,
            Ok(Event::Empty(e)) => {
                on_open(&mut state, &e)?;
                on_close(&mut state);
            }
            Ok(Event::End(_)) => on_close(&mut state),
            Ok(Event::Text(e)) if matches!(state, Scan::Armed) => {
                let text = e.unescape().map_err(quick_xml::Error::from)?;
                state = Scan::Done(parse_count(&text)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    match state {
        Scan::Done(count) => Ok(count),
        _ => Err(CountError::CountNotFound),
    }
}

fn on_open(state: &mut Scan, tag: &BytesStart) -> Result<(), CountError> {
    if matches!(state, Scan::Done(_)) || !tag.name().as_ref().eq_ignore_ascii_case(b"p") {
        return Ok(());
    }
    // Every <p> seen before the count re-decides the armed state, so only
    // the first matching element can ever supply the result.
    *state = if has_count_class(tag)? {
        Scan::Armed
    } else {
        Scan::Searching
    };
    Ok(())
}

fn on_close(state: &mut Scan) {
    // Text after the element closes must never be parsed.
    if matches!(state, Scan::Armed) {
        *state = Scan::Searching;
    }
}

fn has_count_class(tag: &BytesStart) -> Result<bool, CountError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref().eq_ignore_ascii_case(b"class")
            && attr.value.as_ref() == COUNT_CLASS.as_bytes()
        {
            return Ok(true);
        }
    }
    Ok(false)
}

fn parse_count(text: &str) -> Result<u64, CountError> {
    let digits = text.trim().replace(',', "");
    digits
        .parse()
        .map_err(|_| CountError::InvalidCount(text.trim().to_string()))
}

// ── Tests ──
