//! The action vocabulary — colon-delimited button tokens mapped to a closed
//! [`Action`] enum.
//!
//! Every button the layout engine emits carries one of these tokens; the
//! transport echoes the token back verbatim when the button is pressed.
//! Parsing fails closed: an unknown verb or malformed argument is a
//! [`ActionError`], never a silent no-op.
//!
//! # Grammar
//!
//! | Token | Action |
//! |--------------------|-----------------------------------------|
//! | `page:<n>`         | Show page `n` (default grid)            |
//! | `jump:<n>`         | Show page `n` (page-picker grid)        |
//! | `pagesel`          | Open the page picker at the current page|
//! | `sort:<key>`       | Change sort order, reset to page 0      |
//! | `fltmenu:<key>`    | Open the filter menu for `<key>`        |
//! | `flt:<key>:<value>`| Set a filter, reset to page 0           |
//! | `fltclr:<key>`     | Clear a filter, reset to page 0         |
//! | `sel:<id>`         | Select one result                       |
//! | `back:search`      | Return to the default result grid       |
//! | `settings`         | Open the settings surface (transport)   |
//! | `close`            | Dismiss the message (transport)         |
//! | `noop`             | Inert placeholder button                |

use crate::error::ActionError;
use crate::types::{FilterKey, FilterValue, SortKey};

/// A parsed, validated interaction ready for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Page(u32),
    Jump(u32),
    PageSelect,
    Sort(SortKey),
    FilterMenu(FilterKey),
    FilterSet(FilterValue),
    FilterClear(FilterKey),
    Select(u64),
    BackToSearch,
    Settings,
    Close,
    Noop,
}

impl Action {
    /// Parse a raw button token. Fails closed on anything outside the
    /// grammar, including trailing arguments on bare verbs.
    pub fn parse(token: &str) -> Result<Action, ActionError> {
        let (verb, rest) = match token.split_once(':') {
            Some((v, r)) => (v, Some(r)),
            None => (token, None),
        };

        let arg = |name: &str| -> Result<&str, ActionError> {
            rest.filter(|r| !r.is_empty())
                .ok_or_else(|| ActionError::MissingArgument {
                    verb: name.to_string(),
                })
        };
        let bare = |action: Action| -> Result<Action, ActionError> {
            match rest {
                None => Ok(action),
                Some(_) => Err(ActionError::UnknownToken {
                    token: token.to_string(),
                }),
            }
        };

        match verb {
            "page" | "jump" => {
                let n: u32 = arg(verb)?.parse().map_err(|_| ActionError::BadArgument {
                    verb: verb.to_string(),
                    argument: rest.unwrap_or_default().to_string(),
                })?;
                Ok(if verb == "page" {
                    Action::Page(n)
                } else {
                    Action::Jump(n)
                })
            }
            "pagesel" => bare(Action::PageSelect),
            "sort" => {
                let key = SortKey::parse(arg(verb)?).ok_or_else(|| ActionError::BadArgument {
                    verb: verb.to_string(),
                    argument: rest.unwrap_or_default().to_string(),
                })?;
                Ok(Action::Sort(key))
            }
            "fltmenu" | "fltclr" => {
                let key = FilterKey::parse(arg(verb)?).ok_or_else(|| ActionError::BadArgument {
                    verb: verb.to_string(),
                    argument: rest.unwrap_or_default().to_string(),
                })?;
                Ok(if verb == "fltmenu" {
                    Action::FilterMenu(key)
                } else {
                    Action::FilterClear(key)
                })
            }
            "flt" => {
                let (key_str, value_str) =
                    arg(verb)?
                        .split_once(':')
                        .ok_or_else(|| ActionError::BadArgument {
                            verb: verb.to_string(),
                            argument: rest.unwrap_or_default().to_string(),
                        })?;
                let key = FilterKey::parse(key_str).ok_or_else(|| ActionError::BadArgument {
                    verb: verb.to_string(),
                    argument: key_str.to_string(),
                })?;
                let value =
                    FilterValue::parse(key, value_str).ok_or_else(|| ActionError::BadArgument {
                        verb: verb.to_string(),
                        argument: value_str.to_string(),
                    })?;
                Ok(Action::FilterSet(value))
            }
            "sel" => {
                let id: u64 = arg(verb)?.parse().map_err(|_| ActionError::BadArgument {
                    verb: verb.to_string(),
                    argument: rest.unwrap_or_default().to_string(),
                })?;
                Ok(Action::Select(id))
            }
            "back" => match arg(verb)? {
                "search" => Ok(Action::BackToSearch),
                other => Err(ActionError::BadArgument {
                    verb: verb.to_string(),
                    argument: other.to_string(),
                }),
            },
            "settings" => bare(Action::Settings),
            "close" => bare(Action::Close),
            "noop" => bare(Action::Noop),
            _ => Err(ActionError::UnknownToken {
                token: token.to_string(),
            }),
        }
    }

    /// Encode back into the wire token. `parse(encode(a)) == a` for every
    /// action.
    pub fn encode(&self) -> String {
        match self {
            Action::Page(n) => format!("page:{n}"),
            Action::Jump(n) => format!("jump:{n}"),
            Action::PageSelect => "pagesel".to_string(),
            Action::Sort(key) => format!("sort:{key}"),
            Action::FilterMenu(key) => format!("fltmenu:{key}"),
            Action::FilterSet(value) => format!("flt:{}:{}", value.key(), value.as_str()),
            Action::FilterClear(key) => format!("fltclr:{key}"),
            Action::Select(id) => format!("sel:{id}"),
            Action::BackToSearch => "back:search".to_string(),
            Action::Settings => "settings".to_string(),
            Action::Close => "close".to_string(),
            Action::Noop => "noop".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
