use std::{fmt::Display, net::Ipv4Addr};

use ipnetwork::{IpNetwork, Ipv4Network};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier a device is keyed by in the registry and the topology.
pub type DeviceId = String;

/// Addressing data attached to a device. Every field is optional and set independently,
/// so a partially-populated configuration is always valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    pub interface_name: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub subnet: Option<String>,
}

impl DeviceConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    pub fn with_mac_address(mut self, mac: impl Into<String>) -> Self {
        self.mac_address = Some(mac.into());
        self
    }

    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn with_subnet(mut self, subnet: impl Into<String>) -> Self {
        self.subnet = Some(subnet.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.interface_name.is_none()
            && self.mac_address.is_none()
            && self.ip_address.is_none()
            && self.subnet.is_none()
    }

    /// The configured IPv4 address, if present and well-formed.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.ip_address.as_deref()?.trim().parse().ok()
    }

    /// Combines the address with the subnet into a network.
    ///
    /// The subnet may be written as a dotted mask (`255.255.255.0`), a prefix length
    /// (`24` or `/24`) or a CIDR block whose prefix length is reused (`10.0.0.0/8`).
    pub fn network(&self) -> Option<IpNetwork> {
        let ip = self.ipv4()?;
        let subnet = self.subnet.as_deref()?.trim();

        let network = if let Ok(prefix) = subnet.trim_start_matches('/').parse::<u8>() {
            Ipv4Network::new(ip, prefix).ok()?
        } else if let Ok(mask) = subnet.parse::<Ipv4Addr>() {
            Ipv4Network::with_netmask(ip, mask).ok()?
        } else {
            let block: Ipv4Network = subnet.parse().ok()?;
            Ipv4Network::new(ip, block.prefix()).ok()?
        };
        Some(IpNetwork::V4(network))
    }
}

impl Display for DeviceConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = [
            ("Interface", &self.interface_name),
            ("MAC", &self.mac_address),
            ("IPV4", &self.ip_address),
            ("Subnet", &self.subnet),
        ];
        write!(
            f,
            "Config:{{{}}}",
            fields
                .iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
                .collect::<Vec<_>>()
                .join(";")
        )
    }
}

/// A node of the topology: an identifier, a free-form type label and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub device_type: String,
    pub config: DeviceConfiguration,
}

impl Device {
    pub fn new(
        id: impl Into<DeviceId>,
        device_type: impl Into<String>,
        config: DeviceConfiguration,
    ) -> Self {
        Self {
            id: id.into(),
            device_type: device_type.into(),
            config,
        }
    }

    /// Stable UUID derived from the identifier, so the same id always maps to the same node.
    pub fn uuid(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.id.as_bytes())
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Device ID: {}", self.id)?;
        write!(f, "\nType: {}", self.device_type)?;
        if !self.config.is_empty() {
            write!(f, "\n{}", self.config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use super::*;

    #[test]
    fn test_network_from_dotted_mask() {
        let config = DeviceConfiguration::new()
            .with_ip_address("192.168.1.10")
            .with_subnet("255.255.255.0");

        let network = config.network().unwrap();
        assert_eq!(network.ip(), IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)));
        assert_eq!(network.prefix(), 24);
    }

    #[test]
    fn test_network_from_prefix_forms() {
        let short = DeviceConfiguration::new()
            .with_ip_address("10.1.2.3")
            .with_subnet("/16");
        assert_eq!(short.network().unwrap().prefix(), 16);

        let cidr = DeviceConfiguration::new()
            .with_ip_address("10.1.2.3")
            .with_subnet("10.0.0.0/8");
        assert_eq!(cidr.network().unwrap().prefix(), 8);
    }

    #[test]
    fn test_partial_config_is_accepted() {
        let config = DeviceConfiguration::new().with_mac_address("AA:BB:CC:DD:EE:FF");
        assert!(!config.is_empty());
        assert_eq!(config.ipv4(), None);
        assert_eq!(config.network(), None);

        let bogus = DeviceConfiguration::new()
            .with_ip_address("not-an-ip")
            .with_subnet("255.255.255.0");
        assert_eq!(bogus.network(), None);
        assert_eq!(bogus.ip_address.as_deref(), Some("not-an-ip"));
    }

    #[test]
    fn test_uuid_is_stable_per_id() {
        let a = Device::new("R1", "router", DeviceConfiguration::new());
        let b = Device::new("R1", "switch", DeviceConfiguration::new().with_subnet("24"));
        let c = Device::new("R2", "router", DeviceConfiguration::new());

        assert_eq!(a.uuid(), b.uuid());
        assert_ne!(a.uuid(), c.uuid());
    }

    #[test]
    fn test_config_display_skips_unset_fields() {
        let config = DeviceConfiguration::new()
            .with_interface_name("eth0")
            .with_ip_address("10.0.0.1");
        assert_eq!(config.to_string(), "Config:{Interface=eth0;IPV4=10.0.0.1}");
        assert_eq!(DeviceConfiguration::new().to_string(), "Config:{}");
    }
}
