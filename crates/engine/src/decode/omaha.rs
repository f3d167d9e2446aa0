//! Decoder for Omaha protocol XML request bodies.
//!
//! ```xml
//! <request protocol="3.0" ...>
//!   <app appid="ldimlcelhnjgpjjemdjokpgeeikdinbm">
//!     <updatecheck codebase="..." version="0.0.0"/>
//!   </app>
//! </request>
//! ```

use extgate_types::{AppQuery, RequestEnvelope};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, UpdateError};

/// The only request protocol version this decoder accepts.
pub const SUPPORTED_PROTOCOL: &str = "3.0";

const ROOT_ELEMENT: &str = "request";
const APP_ELEMENT: &[u8] = b"app";
const UPDATE_CHECK_ELEMENT: &[u8] = b"updatecheck";

/// Decode an Omaha request body.
///
/// Bodies whose length is at or above `max_body_size` are rejected before
/// the parser sees a single byte.
pub fn decode(body: &[u8], max_body_size: usize) -> Result<RequestEnvelope> {
    if body.len() >= max_body_size {
        return Err(UpdateError::BodyTooLarge);
    }

    let mut reader = Reader::from_reader(body);

    let (protocol, self_closed) = loop {
        match reader.read_event().map_err(UpdateError::decode)? {
            Event::Start(e) => break (root_protocol(&e)?, false),
            Event::Empty(e) => break (root_protocol(&e)?, true),
            Event::Eof => return Err(UpdateError::Decode("EOF".to_string())),
            _ => {}
        }
    };

    let apps = if self_closed {
        Vec::new()
    } else {
        read_apps(&mut reader)?
    };

    // The whole document has to be well formed before its version is judged
    let protocol = protocol.unwrap_or_default();
    if protocol != SUPPORTED_PROTOCOL {
        return Err(UpdateError::UnsupportedProtocol(protocol));
    }

    Ok(RequestEnvelope::omaha(protocol, apps))
}

fn root_protocol(element: &BytesStart<'_>) -> Result<Option<String>> {
    let name = element.local_name();
    if name.as_ref() != ROOT_ELEMENT.as_bytes() {
        return Err(UpdateError::Decode(format!(
            "expected element type <{}> but have <{}>",
            ROOT_ELEMENT,
            String::from_utf8_lossy(name.as_ref())
        )));
    }

    attribute(element, "protocol")
}

struct PendingApp {
    id: String,
    app_version: Option<String>,
    check_version: Option<String>,
}

impl PendingApp {
    fn from_element(element: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            id: attribute(element, "appid")?.unwrap_or_default(),
            app_version: attribute(element, "version")?,
            check_version: None,
        })
    }

    fn into_query(self) -> AppQuery {
        let version = self.check_version.or(self.app_version).unwrap_or_default();
        AppQuery::new(self.id, version)
    }
}

/// Collect `app` children of the root element, in document order.
fn read_apps(reader: &mut Reader<&[u8]>) -> Result<Vec<AppQuery>> {
    let mut apps = Vec::new();
    let mut pending: Option<PendingApp> = None;
    // Depth of the element currently open, the root being 1
    let mut depth = 1usize;

    loop {
        match reader.read_event().map_err(UpdateError::decode)? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 && e.local_name().as_ref() == APP_ELEMENT {
                    pending = Some(PendingApp::from_element(&e)?);
                } else if depth == 3 {
                    record_update_check(&e, pending.as_mut())?;
                }
            }
            Event::Empty(e) => {
                if depth == 1 && e.local_name().as_ref() == APP_ELEMENT {
                    apps.push(PendingApp::from_element(&e)?.into_query());
                } else if depth == 2 {
                    record_update_check(&e, pending.as_mut())?;
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(app) = pending.take() {
                        apps.push(app.into_query());
                    }
                }
                depth -= 1;
                if depth == 0 {
                    return Ok(apps);
                }
            }
            Event::Eof => return Err(UpdateError::Decode("unexpected EOF".to_string())),
            _ => {}
        }
    }
}

fn record_update_check(element: &BytesStart<'_>, app: Option<&mut PendingApp>) -> Result<()> {
    if let Some(app) = app {
        if element.local_name().as_ref() == UPDATE_CHECK_ELEMENT {
            app.check_version = attribute(element, "version")?;
        }
    }
    Ok(())
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match element
        .try_get_attribute(name)
        .map_err(UpdateError::decode)?
    {
        Some(attr) => Ok(Some(
            attr.unescape_value()
                .map_err(UpdateError::decode)?
                .into_owned(),
        )),
        None => Ok(None),
    }
}
