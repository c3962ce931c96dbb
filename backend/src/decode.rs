use analysis::event::Event;

#[derive(Debug, PartialEq)]
pub struct DecodedDemo {
    pub map: String,
    pub events: Vec<Event>,
}

/// Turns an unpacked demo into the typed event stream.
pub trait EventDecoder: Send + Sync {
    fn decode(&self, path: &std::path::Path) -> Result<DecodedDemo, crate::RunError>;
}

#[derive(Debug, serde::Deserialize)]
struct Header {
    map: String,
}

/// Reads event logs as written by the demo exporter: a `{"map": ...}` header
/// line followed by one JSON encoded event per line.
pub struct JsonLinesDecoder {}

impl JsonLinesDecoder {
    pub fn new() -> Self {
        Self {}
    }

    pub fn decode_reader<R>(&self, reader: R) -> Result<DecodedDemo, crate::RunError>
    where
        R: std::io::BufRead,
    {
        let mut header: Option<Header> = None;
        let mut events = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let decode_err = |e: serde_json::Error| crate::RunError::Decode {
                line: line_number,
                reason: e.to_string(),
            };

            match header {
                None => {
                    header = Some(serde_json::from_str(&line).map_err(decode_err)?);
                }
                Some(_) => {
                    events.push(serde_json::from_str(&line).map_err(decode_err)?);
                }
            };
        }

        let header = header.ok_or_else(|| crate::RunError::Decode {
            line: 0,
            reason: "missing header".to_owned(),
        })?;

        tracing::debug!("Decoded {} events on {}", events.len(), header.map);

        Ok(DecodedDemo {
            map: header.map,
            events,
        })
    }
}

impl Default for JsonLinesDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDecoder for JsonLinesDecoder {
    #[tracing::instrument(name = "JsonLines", skip(self))]
    fn decode(&self, path: &std::path::Path) -> Result<DecodedDemo, crate::RunError> {
        let file = std::fs::File::open(path)?;
        self.decode_reader(std::io::BufReader::new(file))
    }
}
