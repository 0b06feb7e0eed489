use crate::{
    network::device::{Device, DeviceId},
    parsers::{ParseError, config::parse_config},
};

/// Parses one line of a device file: `id,type[,Config:{...}]`.
///
/// Blank lines yield `Ok(None)`. The third field is everything after the second comma, so the
/// config block may itself contain commas.
pub fn parse_device_line(line: &str) -> Result<Option<Device>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.splitn(3, ',');
    let id = fields.next().unwrap_or_default().trim();
    let Some(device_type) = fields.next().map(str::trim) else {
        return Err(ParseError::MissingField {
            field: "type",
            line: line.to_string(),
        });
    };
    if id.is_empty() {
        return Err(ParseError::EmptyId(line.to_string()));
    }
    let config = fields.next().map(parse_config).unwrap_or_default();

    Ok(Some(Device::new(id, device_type, config)))
}

/// Parses one line of a connection file: `idA,idB`. Blank lines yield `Ok(None)`.
pub fn parse_connection_line(line: &str) -> Result<Option<(DeviceId, DeviceId)>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some((a, b)) = line.split_once(',') else {
        return Err(ParseError::MissingField {
            field: "second device id",
            line: line.to_string(),
        });
    };
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return Err(ParseError::EmptyId(line.to_string()));
    }
    Ok(Some((a.to_string(), b.to_string())))
}
