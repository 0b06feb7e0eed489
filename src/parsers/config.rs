use crate::network::device::DeviceConfiguration;

const CONFIG_MARKER: &str = "Config:{";

/// Parses the `Config:{Interface=..;MAC=..;IPV4=..;Subnet=..}` field of a device line.
///
/// This never fails: anything that is not a config block yields an empty configuration, and
/// unknown keys or tokens without `=` are ignored. Keys are case-sensitive.
pub fn parse_config(field: &str) -> DeviceConfiguration {
    let mut config = DeviceConfiguration::new();

    let field = field.trim();
    if !field.contains(CONFIG_MARKER) || !field.ends_with('}') {
        return config;
    }
    let (Some(start), Some(end)) = (field.find('{'), field.rfind('}')) else {
        return config;
    };
    if end <= start {
        return config;
    }

    for token in field[start + 1..end].split(';') {
        let Some((key, value)) = token.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "Interface" => config.interface_name = Some(value),
            "MAC" => config.mac_address = Some(value),
            "IPV4" => config.ip_address = Some(value),
            "Subnet" => config.subnet = Some(value),
            _ => {}
        }
    }
    config
}
