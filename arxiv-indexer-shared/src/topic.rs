//! Catalog topic codes.
//!
//! The catalog feed filters by computer science subject areas. Codes are a
//! closed set so a malformed code can never reach the feed query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a known topic code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown topic code: {0}")]
pub struct TopicCodeError(pub String);

macro_rules! topic_codes {
    ($($variant:ident => $code:literal, $label:literal;)+) => {
        /// A computer science subject area on the catalog feed.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum TopicCode {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl TopicCode {
            /// Every known topic code, in catalog order.
            pub const ALL: &'static [TopicCode] = &[$(TopicCode::$variant),+];

            /// The two-letter code (e.g. `AI`).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TopicCode::$variant => $code,)+
                }
            }

            /// Human readable subject name.
            pub fn label(&self) -> &'static str {
                match self {
                    $(TopicCode::$variant => $label,)+
                }
            }
        }

        impl FromStr for TopicCode {
            type Err = TopicCodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let code = s.trim();
                let code = code.strip_prefix("cs.").unwrap_or(code);
                match code.to_ascii_uppercase().as_str() {
                    $($code => Ok(TopicCode::$variant),)+
                    _ => Err(TopicCodeError(s.to_string())),
                }
            }
        }
    };
}

topic_codes! {
    Ai => "AI", "Artificial Intelligence";
    Ar => "AR", "Hardware Architecture";
    Cc => "CC", "Computational Complexity";
    Ce => "CE", "Computational Engineering, Finance, and Science";
    Cl => "CL", "Computation and Language";
    Cr => "CR", "Cryptography and Security";
    Cv => "CV", "Computer Vision and Pattern Recognition";
    Cy => "CY", "Computers and Society";
    Db => "DB", "Databases";
    Dc => "DC", "Distributed, Parallel, and Cluster Computing";
    Dl => "DL", "Digital Libraries";
    Dm => "DM", "Discrete Mathematics";
    Ds => "DS", "Data Structures and Algorithms";
    Et => "ET", "Emerging Technologies";
    Gr => "GR", "Graphics";
    Gt => "GT", "Computer Science and Game Theory";
    Hc => "HC", "Human-Computer Interaction";
    Ir => "IR", "Information Retrieval";
    It => "IT", "Information Theory";
    Lo => "LO", "Logic in Computer Science";
    Lg => "LG", "Machine Learning";
    Ma => "MA", "Multiagent Systems";
    Mm => "MM", "Multimedia";
    Ms => "MS", "Mathematical Software";
    Na => "NA", "Numerical Analysis";
    Ne => "NE", "Neural and Evolutionary Computing";
    Ni => "NI", "Networking and Internet Architecture";
    Os => "OS", "Operating Systems";
    Pf => "PF", "Performance";
    Pl => "PL", "Programming Languages";
    Ro => "RO", "Robotics";
    Sc => "SC", "Symbolic Computation";
    Sd => "SD", "Sound";
    Se => "SE", "Software Engineering";
    Si => "SI", "Social and Information Networks";
    Sy => "SY", "Systems and Control";
}

impl TopicCode {
    /// Category term as used by the catalog (e.g. `cs.AI`).
    pub fn category(&self) -> String {
        format!("cs.{}", self.as_str())
    }

    /// Feed query clause selecting this category.
    pub fn query_term(&self) -> String {
        format!("cat:{}", self.category())
    }

    /// Parse a comma-separated list such as `AI,CL,CV`.
    ///
    /// Empty segments are ignored; any unknown code fails the whole list.
    pub fn parse_list(input: &str) -> Result<Vec<TopicCode>, TopicCodeError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(TopicCode::from_str)
            .collect()
    }
}

impl fmt::Display for TopicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!("AI".parse::<TopicCode>(), Ok(TopicCode::Ai));
        assert_eq!("cl".parse::<TopicCode>(), Ok(TopicCode::Cl));
        assert_eq!("cs.CV".parse::<TopicCode>(), Ok(TopicCode::Cv));
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "QQ".parse::<TopicCode>().unwrap_err();
        assert_eq!(err, TopicCodeError("QQ".to_string()));
    }

    #[test]
    fn test_query_term() {
        assert_eq!(TopicCode::Lg.query_term(), "cat:cs.LG");
        assert_eq!(TopicCode::Sy.category(), "cs.SY");
    }

    #[test]
    fn test_parse_list() {
        let topics = TopicCode::parse_list("AI, CL,,CV").unwrap();
        assert_eq!(topics, vec![TopicCode::Ai, TopicCode::Cl, TopicCode::Cv]);

        assert!(TopicCode::parse_list("AI,XX").is_err());
    }

    #[test]
    fn test_all_codes_round_trip() {
        assert_eq!(TopicCode::ALL.len(), 36);
        for code in TopicCode::ALL {
            assert_eq!(code.as_str().parse::<TopicCode>(), Ok(*code));
        }
    }
}
