//! Message exchange - the per-request record of one relayed message.

/// One inbound message, the assistant's reply, and the optional enrichment.
///
/// Built per request and dropped once the response is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageExchange {
    inbound: String,
    reply: String,
    enrichment: Option<String>,
}

impl MessageExchange {
    /// Creates an exchange without enrichment.
    pub fn new(inbound: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            inbound: inbound.into(),
            reply: reply.into(),
            enrichment: None,
        }
    }

    /// Attaches the completion model's text.
    pub fn with_enrichment(mut self, enrichment: impl Into<String>) -> Self {
        self.enrichment = Some(enrichment.into());
        self
    }

    pub fn inbound(&self) -> &str {
        &self.inbound
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn enrichment(&self) -> Option<&str> {
        self.enrichment.as_deref()
    }

    /// Splits the exchange into `(reply, enrichment)` for response building.
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.reply, self.enrichment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_exchange_has_no_enrichment() {
        let exchange = MessageExchange::new("hola", "hello");
        assert_eq!(exchange.inbound(), "hola");
        assert_eq!(exchange.reply(), "hello");
        assert_eq!(exchange.enrichment(), None);
    }

    #[test]
    fn enrichment_is_carried_into_parts() {
        let exchange = MessageExchange::new("hola", "hello").with_enrichment("hello there!");
        assert_eq!(exchange.enrichment(), Some("hello there!"));

        let (reply, enrichment) = exchange.into_parts();
        assert_eq!(reply, "hello");
        assert_eq!(enrichment.as_deref(), Some("hello there!"));
    }
}
