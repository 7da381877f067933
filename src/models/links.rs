use std::sync::LazyLock;

use regex::Regex;

use crate::models::proposal::ProposedTransaction;

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"));

/// Characters of a transaction hash shown as link text.
pub const TX_HASH_PREFIX_LEN: usize = 7;

/// True for `0x` followed by 40 hex digits.
pub fn is_address(content: &str) -> bool {
    ADDRESS_RE.is_match(content)
}

/// A piece of rendered text, linked or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Link { href: String, text: String },
    Text(String),
}

impl Content {
    pub fn href(&self) -> Option<&str> {
        match self {
            Content::Link { href, .. } => Some(href),
            Content::Text(_) => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Content::Link { text, .. } => text,
            Content::Text(text) => text,
        }
    }
}

/// One proposed call, ready for display as `target.sig(value)(args...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTransaction {
    pub target: Content,
    pub function_sig: String,
    pub value: String,
    pub arguments: Vec<Content>,
}

/// Block explorer link builder.
#[derive(Debug, Clone)]
pub struct Explorer {
    base_url: String,
}

impl Explorer {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn address_link(&self, address: &str) -> String {
        format!("{}/address/{}", self.base_url, address)
    }

    pub fn tx_link(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.base_url, hash)
    }

    pub fn link_if_address(&self, content: &str) -> Content {
        if is_address(content) {
            Content::Link { href: self.address_link(content), text: content.to_string() }
        } else {
            Content::Text(content.to_string())
        }
    }

    /// Always a link; the text is the hash prefix.
    pub fn transaction_link(&self, hash: &str) -> Content {
        Content::Link {
            href: self.tx_link(hash),
            text: hash.chars().take(TX_HASH_PREFIX_LEN).collect(),
        }
    }

    pub fn render_transaction(&self, tx: &ProposedTransaction) -> RenderedTransaction {
        RenderedTransaction {
            target: self.link_if_address(&tx.target),
            function_sig: tx.function_sig.clone(),
            value: tx.value.clone(),
            arguments: tx.call_data.split(',').map(|arg| self.link_if_address(arg)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: &str = "0x0000000000000000000000000000000000000000";

    #[test]
    fn address_format() {
        assert!(is_address(ZERO));
        assert!(is_address("0xAbCdEf0123456789abcdef0123456789ABCDEF01"));
        assert!(!is_address("hello"));
        assert!(!is_address("0x123"));
        assert!(!is_address(&format!(" {ZERO}")));
    }

    #[test]
    fn links_addresses_only() {
        let explorer = Explorer::new("https://etherscan.io/");
        assert_eq!(
            explorer.link_if_address(ZERO),
            Content::Link {
                href: format!("https://etherscan.io/address/{ZERO}"),
                text: ZERO.to_string(),
            }
        );
        assert_eq!(explorer.link_if_address("hello"), Content::Text("hello".into()));
    }

    #[test]
    fn tx_link_truncates_text() {
        let explorer = Explorer::new("https://etherscan.io");
        let link = explorer.transaction_link("0xdeadbeefcafe");
        assert_eq!(link.text(), "0xdeadb");
        assert_eq!(link.href(), Some("https://etherscan.io/tx/0xdeadbeefcafe"));
    }

    #[test]
    fn renders_call_data_arguments() {
        let explorer = Explorer::new("https://etherscan.io");
        let tx = ProposedTransaction {
            target: ZERO.to_string(),
            function_sig: "transfer(address,uint256)".into(),
            value: "".into(),
            call_data: format!("{ZERO},1000"),
        };
        let rendered = explorer.render_transaction(&tx);
        assert!(rendered.target.href().is_some());
        assert_eq!(rendered.arguments.len(), 2);
        assert!(rendered.arguments[0].href().is_some());
        assert_eq!(rendered.arguments[1], Content::Text("1000".into()));
    }
}
