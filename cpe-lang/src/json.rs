// This file is part of cpe-rs, a Common Platform Enumeration toolkit.
// Copyright (C) 2026 the cpe-rs authors

//! Parser for the NVD JSON configuration shape
//!
//! The National Vulnerability Database publishes applicability statements
//! as `{"configurations": {"nodes": [...]}}`. Each node carries an
//! `operator`, an optional `negate` flag, and either nested `children` or a
//! `cpe_match` array of name references. Every top-level node becomes one
//! [`Platform`] without a title; the logical structure maps one-to-one onto
//! [`LogicalTest`]s.

use crate::{ExpressionError, LogicalTest, Operand, Operator, Platform, PlatformSpecification};
use cpe_name::Name;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Document {
    configurations: Configurations,
}

#[derive(Debug, Deserialize)]
struct Configurations {
    #[serde(default)]
    nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    operator: String,
    #[serde(default)]
    negate: bool,
    #[serde(default)]
    children: Vec<Node>,
    #[serde(default)]
    cpe_match: Vec<CpeMatch>,
}

#[derive(Debug, Deserialize)]
struct CpeMatch {
    #[serde(rename = "cpe23Uri")]
    cpe23_uri: String,
}

pub(crate) fn parse(text: &str) -> Result<PlatformSpecification, ExpressionError> {
    let document: Document =
        serde_json::from_str(text).map_err(|error| ExpressionError::Json(error.to_string()))?;
    let platforms = document
        .configurations
        .nodes
        .into_iter()
        .map(|node| {
            Ok(Platform {
                id: None,
                title: None,
                test: convert(node)?,
            })
        })
        .collect::<Result<_, ExpressionError>>()?;
    Ok(PlatformSpecification { platforms })
}

fn convert(node: Node) -> Result<LogicalTest, ExpressionError> {
    let operator = Operator::parse(&node.operator)?;
    let mut operands = Vec::with_capacity(node.cpe_match.len() + node.children.len());
    for reference in node.cpe_match {
        operands.push(Operand::FactRef(Name::parse(&reference.cpe23_uri)?));
    }
    for child in node.children {
        operands.push(Operand::Test(convert(child)?));
    }
    if operands.is_empty() {
        return Err(ExpressionError::MissingOperands);
    }
    Ok(LogicalTest {
        operator,
        negate: node.negate,
        operands,
    })
}
