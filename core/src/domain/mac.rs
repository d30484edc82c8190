//! MAC address extraction from neighbor-table output.

use std::net::Ipv4Addr;

use regex::Regex;

use crate::error::{Error, Result};

/// Six hex pairs separated by `:` or `-` (Windows `arp -a` output).
const COLON_OR_HYPHEN: &str = r"([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}";

/// Six hex pairs separated by `:` (Linux/BSD `arp -n` output).
const COLON_ONLY: &str = r"([0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}";

/// Pattern used to pull a MAC token out of neighbor-table text.
#[derive(Debug, Clone)]
pub struct MacPattern {
    regex: Regex,
}

impl MacPattern {
    /// Colon- or hyphen-delimited pairs.
    pub fn colon_or_hyphen() -> Self {
        Self {
            regex: Regex::new(COLON_OR_HYPHEN).unwrap(),
        }
    }

    /// Colon-delimited pairs only.
    pub fn colon_only() -> Self {
        Self {
            regex: Regex::new(COLON_ONLY).unwrap(),
        }
    }

    /// The pattern matching the current platform's `arp` output.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::colon_or_hyphen()
        } else {
            Self::colon_only()
        }
    }

    /// A user-supplied pattern.
    pub fn custom(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::ParseError(format!("Invalid MAC pattern '{}': {}", pattern, e)))?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// First usable MAC token in `text`, upper-cased.
    ///
    /// All-zero and broadcast tokens are skipped.
    pub fn find(&self, text: &str) -> Option<String> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str().to_uppercase())
            .find(|token| !is_placeholder(token))
    }

    /// MAC token for `address` in a neighbor-table dump.
    ///
    /// Lines naming the address are searched first. When no line names it
    /// (single-entry output that omits the address), the whole text is used.
    pub fn find_for(&self, text: &str, address: Ipv4Addr) -> Option<String> {
        let needle = address.to_string();
        let mut mentioned = false;

        for line in text.lines().filter(|line| mentions(line, &needle)) {
            mentioned = true;
            if let Some(token) = self.find(line) {
                return Some(token);
            }
        }

        if mentioned {
            None
        } else {
            self.find(text)
        }
    }
}

impl Default for MacPattern {
    fn default() -> Self {
        Self::platform_default()
    }
}

fn is_placeholder(token: &str) -> bool {
    let hex: String = token.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    hex.chars().all(|c| c == '0') || hex.chars().all(|c| c == 'F')
}

/// Whether `line` contains `needle` as a whole address (not a prefix of `.10`).
fn mentions(line: &str, needle: &str) -> bool {
    let is_addr_char = |c: char| c.is_ascii_digit() || c == '.';

    line.match_indices(needle).any(|(start, _)| {
        let before = line[..start].chars().next_back();
        let after = line[start + needle.len()..].chars().next();
        !before.is_some_and(is_addr_char) && !after.is_some_and(is_addr_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_ARP: &str = "\
Address                  HWtype  HWaddress           Flags Mask            Iface
192.168.1.5              ether   0a:1b:2c:3d:4e:5f   C                     eth0
";

    const WINDOWS_ARP: &str = "
Interface: 192.168.1.2 --- 0x4
  Internet Address      Physical Address      Type
  192.168.1.1           a4-91-b1-0c-22-10     dynamic
  192.168.1.15          3c-52-82-aa-bb-cc     dynamic
  192.168.1.255         ff-ff-ff-ff-ff-ff     static
";

    #[test]
    fn test_linux_arp_line() {
        let pattern = MacPattern::colon_only();
        let mac = pattern.find_for(LINUX_ARP, Ipv4Addr::new(192, 168, 1, 5));
        assert_eq!(mac.as_deref(), Some("0A:1B:2C:3D:4E:5F"));
    }

    #[test]
    fn test_windows_arp_picks_matching_line() {
        let pattern = MacPattern::colon_or_hyphen();
        let mac = pattern.find_for(WINDOWS_ARP, Ipv4Addr::new(192, 168, 1, 15));
        assert_eq!(mac.as_deref(), Some("3C-52-82-AA-BB-CC"));

        let mac = pattern.find_for(WINDOWS_ARP, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(mac.as_deref(), Some("A4-91-B1-0C-22-10"));
    }

    #[test]
    fn test_colon_only_ignores_hyphens() {
        let pattern = MacPattern::colon_only();
        assert_eq!(pattern.find("192.168.1.1 a4-91-b1-0c-22-10"), None);
    }

    #[test]
    fn test_incomplete_entry() {
        let pattern = MacPattern::colon_only();
        let output = "192.168.1.9                      (incomplete)                              eth0\n";
        assert_eq!(pattern.find_for(output, Ipv4Addr::new(192, 168, 1, 9)), None);
    }

    #[test]
    fn test_no_entry_message() {
        let pattern = MacPattern::colon_only();
        let output = "192.168.1.77 (192.168.1.77) -- no entry\n";
        assert_eq!(pattern.find_for(output, Ipv4Addr::new(192, 168, 1, 77)), None);
    }

    #[test]
    fn test_address_prefix_is_not_a_mention() {
        assert!(!mentions("192.168.1.15 3c-52-82-aa-bb-cc", "192.168.1.1"));
        assert!(mentions("? (192.168.1.1) at a4:91:b1:0c:22:10", "192.168.1.1"));
    }

    #[test]
    fn test_output_without_address_falls_back_to_whole_text() {
        let pattern = MacPattern::colon_only();
        let output = "ether 0a:1b:2c:3d:4e:5f C eth0";
        assert_eq!(
            pattern.find_for(output, Ipv4Addr::new(10, 0, 0, 3)).as_deref(),
            Some("0A:1B:2C:3D:4E:5F")
        );
    }

    #[test]
    fn test_placeholders_skipped() {
        let pattern = MacPattern::colon_or_hyphen();
        assert_eq!(pattern.find("00:00:00:00:00:00"), None);
        assert_eq!(pattern.find("FF-FF-FF-FF-FF-FF"), None);
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = MacPattern::custom(r"([0-9a-f]{1,2}:){5}[0-9a-f]{1,2}").unwrap();
        let output = "? (192.168.1.1) at 0:1b:2c:3d:4e:5f on en0 ifscope [ethernet]";
        assert_eq!(
            pattern.find_for(output, Ipv4Addr::new(192, 168, 1, 1)).as_deref(),
            Some("0:1B:2C:3D:4E:5F")
        );

        assert!(matches!(MacPattern::custom("(["), Err(Error::ParseError(_))));
    }
}
