// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Parser for the platform-specification XML format
//!
//! The format nests `<cpe:platform>` elements inside a
//! `<cpe:platform-specification>` root. Each platform carries an optional
//! `<cpe:title>`, and exactly one root `<cpe:logical-test>` whose children
//! are further logical tests and `<cpe:fact-ref>` leaves. Elements are
//! recognized by local name, so any prefix bound to the
//! `http://cpe.mitre.org/language/2.0` namespace works; unrelated elements
//! such as remarks are skipped.

use crate::{ExpressionError, LogicalTest, Operand, Operator, Platform, PlatformSpecification};
use cpe_name::Name;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Logical test under construction
struct Frame {
    operator: Operator,
    negate: bool,
    operands: Vec<Operand>,
}

/// Platform under construction
#[derive(Default)]
struct Pending {
    id: Option<String>,
    title: Option<String>,
    title_buffer: String,
    capturing_title: bool,
    root: Option<LogicalTest>,
}

pub(crate) fn parse(text: &str) -> Result<PlatformSpecification, ExpressionError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut platforms = Vec::new();
    let mut platform: Option<Pending> = None;
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event() {
            Err(error) => return Err(ExpressionError::Xml(error.to_string())),
            Ok(Event::Start(element)) => {
                open(&element, false, &mut platform, &mut stack)?;
            }
            Ok(Event::Empty(element)) => {
                open(&element, true, &mut platform, &mut stack)?;
            }
            Ok(Event::End(element)) => match element.local_name().as_ref() {
                b"title" => {
                    if let Some(pending) = &mut platform {
                        if pending.capturing_title {
                            pending.capturing_title = false;
                            if pending.title.is_none() && !pending.title_buffer.is_empty() {
                                pending.title = Some(std::mem::take(&mut pending.title_buffer));
                            }
                            pending.title_buffer.clear();
                        }
                    }
                }
                b"logical-test" => {
                    close_test(&mut platform, &mut stack)?;
                }
                b"platform" => {
                    let pending = platform.take().ok_or_else(misplaced("platform"))?;
                    let test = pending.root.ok_or(ExpressionError::MissingTest)?;
                    platforms.push(Platform {
                        id: pending.id,
                        title: pending.title,
                        test,
                    });
                }
                _ => {}
            },
            Ok(Event::Text(content)) => {
                if let Some(pending) = &mut platform {
                    if pending.capturing_title {
                        let content = content
                            .unescape()
                            .map_err(|error| ExpressionError::Xml(error.to_string()))?;
                        pending.title_buffer.push_str(&content);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
        }
    }
    Ok(PlatformSpecification { platforms })
}

fn misplaced(name: &str) -> impl Fn() -> ExpressionError + '_ {
    move || ExpressionError::MisplacedElement(name.to_string())
}

fn open(
    element: &BytesStart<'_>,
    self_closing: bool,
    platform: &mut Option<Pending>,
    stack: &mut Vec<Frame>,
) -> Result<(), ExpressionError> {
    match element.local_name().as_ref() {
        b"platform-specification" => Ok(()),
        b"platform" => {
            if platform.is_some() {
                return Err(misplaced("platform")());
            }
            *platform = Some(Pending {
                id: attribute(element, b"id")?,
                ..Pending::default()
            });
            Ok(())
        }
        b"title" => {
            let pending = platform.as_mut().ok_or_else(misplaced("title"))?;
            pending.capturing_title = !self_closing;
            Ok(())
        }
        b"logical-test" => {
            if platform.is_none() {
                return Err(misplaced("logical-test")());
            }
            if self_closing {
                // No content means no operands.
                return Err(ExpressionError::MissingOperands);
            }
            let operator = attribute(element, b"operator")?
                .ok_or(ExpressionError::MissingOperator)
                .and_then(|text| Operator::parse(&text))?;
            let negate = match attribute(element, b"negate")? {
                None => false,
                Some(text) if text.eq_ignore_ascii_case("TRUE") => true,
                Some(text) if text.eq_ignore_ascii_case("FALSE") => false,
                Some(text) => return Err(ExpressionError::InvalidNegation(text)),
            };
            stack.push(Frame {
                operator,
                negate,
                operands: Vec::new(),
            });
            Ok(())
        }
        b"fact-ref" => {
            let frame = stack.last_mut().ok_or_else(misplaced("fact-ref"))?;
            let name = attribute(element, b"name")?.ok_or(ExpressionError::MissingName)?;
            frame.operands.push(Operand::FactRef(Name::parse(&name)?));
            Ok(())
        }
        _ => Ok(()),
    }
}

fn close_test(
    platform: &mut Option<Pending>,
    stack: &mut Vec<Frame>,
) -> Result<(), ExpressionError> {
    let frame = stack.pop().ok_or_else(misplaced("logical-test"))?;
    if frame.operands.is_empty() {
        return Err(ExpressionError::MissingOperands);
    }
    let test = LogicalTest {
        operator: frame.operator,
        negate: frame.negate,
        operands: frame.operands,
    };
    if let Some(parent) = stack.last_mut() {
        parent.operands.push(Operand::Test(test));
        return Ok(());
    }
    let pending = platform.as_mut().ok_or_else(misplaced("logical-test"))?;
    if pending.root.is_some() {
        return Err(ExpressionError::MultipleTests);
    }
    pending.root = Some(test);
    Ok(())
}

fn attribute(
    element: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, ExpressionError> {
    for attribute in element.attributes() {
        let attribute =
            attribute.map_err(|error| ExpressionError::Xml(error.to_string()))?;
        if attribute.key.local_name().as_ref() == key {
            let value = attribute
                .unescape_value()
                .map_err(|error| ExpressionError::Xml(error.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
