use serde::Serialize;

/// A recommended telecom reference site.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Resource {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub static TELECOM_RESOURCES: [Resource; 3] = [
    Resource {
        name: "3GPP Specifications",
        url: "https://www.3gpp.org/specifications",
        description: "Official 3GPP specifications including SMS and GSM standards",
    },
    Resource {
        name: "GSMA Technical Resources",
        url: "https://www.gsma.com/newsroom/resources/",
        description: "Technical resources from the GSM Association",
    },
    Resource {
        name: "ETSI Standards",
        url: "https://www.etsi.org/standards",
        description: "European Telecommunications Standards Institute documents",
    },
];
