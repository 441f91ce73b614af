//! `.conversation` file reading

use super::types::{ConditionalExpression, ConversationData, ConversationNode, Link, NodeKind, Operator, ScriptCall};
use crate::error::{Error, Result};
use crate::formats::xml::{XmlElement, parse_xml};
use std::fs;
use std::path::Path;

/// Read a conversation file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid conversation.
pub fn read_conversation<P: AsRef<Path>>(path: P) -> Result<ConversationData> {
    let content = fs::read_to_string(path)?;
    parse_conversation(&content)
}

/// Parse a conversation from its XML text
///
/// # Errors
/// Returns an error if the XML is malformed or a node is missing required data.
pub fn parse_conversation(content: &str) -> Result<ConversationData> {
    let root = parse_xml(content)?;
    if root.name != "ConversationData" {
        return Err(Error::UnexpectedRoot {
            expected: "ConversationData",
            found: root.name,
        });
    }

    let mut data = ConversationData::new();
    if let Some(nodes) = root.child("Nodes") {
        for element in &nodes.children {
            data.insert(parse_node(element)?)?;
        }
    }
    Ok(data)
}

fn parse_node(element: &XmlElement) -> Result<ConversationNode> {
    let node_id = element.child_i32("NodeID")?;
    let kind = parse_kind(element, node_id)?;

    let mut links = Vec::new();
    if let Some(list) = element.child("Links") {
        for link in &list.children {
            links.push(Link {
                to_node_id: link.child_i32("ToNodeID")?,
            });
        }
    }

    let conditionals = match element.child("Conditionals") {
        Some(expr) => parse_expression(expr)?,
        None => ConditionalExpression::default(),
    };

    Ok(ConversationNode {
        node_id,
        kind,
        conditionals,
        on_enter_scripts: parse_scripts(element.child("OnEnterScripts"))?,
        on_update_scripts: parse_scripts(element.child("OnUpdateScripts"))?,
        on_exit_scripts: parse_scripts(element.child("OnExitScripts"))?,
        links,
    })
}

fn parse_kind(element: &XmlElement, node_id: i32) -> Result<NodeKind> {
    let kind = match element.type_name().unwrap_or_default() {
        "PlayerResponseNode" => NodeKind::PlayerResponse,
        "BankNode" | "PlayerResponseBankNode" => {
            let mut child_node_ids = Vec::new();
            if let Some(list) = element.child("ChildNodeIDs") {
                for id in &list.children {
                    child_node_ids.push(id.as_i32()?);
                }
            }
            NodeKind::Bank { child_node_ids }
        }
        "TriggerConversationNode" => NodeKind::Trigger {
            target_file: element.child_text("ConversationFilename").unwrap_or_default().to_string(),
            target_node_id: element.child_i32("StartNodeID")?,
        },
        _ if node_id == 0 => NodeKind::Root,
        _ => NodeKind::Generic,
    };
    Ok(kind)
}

/// Parse a `ConditionalExpression` or `ExpressionComponent` element
fn parse_expression(element: &XmlElement) -> Result<ConditionalExpression> {
    let is_call = element.type_name() == Some("ConditionalCall")
        || (element.type_name().is_none() && element.child("Data").is_some());

    if is_call {
        return Ok(ConditionalExpression::Call {
            not: element.child_bool("Not")?,
            operator: element
                .child_text("Operator")
                .unwrap_or("And")
                .parse::<Operator>()
                .unwrap_or_default(),
            call: parse_call_data(element.require("Data")?),
        });
    }

    let mut components = Vec::new();
    if let Some(list) = element.child("Components") {
        for component in &list.children {
            components.push(parse_expression(component)?);
        }
    }
    Ok(ConditionalExpression::Group { components })
}

fn parse_scripts(list: Option<&XmlElement>) -> Result<Vec<ScriptCall>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.children
        .iter()
        .map(|script| script.require("Data").map(parse_call_data))
        .collect()
}

fn parse_call_data(data: &XmlElement) -> ScriptCall {
    let parameters = data
        .child("Parameters")
        .map(|list| list.children.iter().map(|p| p.text.clone()).collect())
        .unwrap_or_default();
    ScriptCall {
        full_name: data.child_text("FullName").unwrap_or_default().to_string(),
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ConversationData xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Nodes>
    <FlowChartNode xsi:type="TalkNode">
      <NodeID>0</NodeID>
      <Links>
        <FlowChartLink xsi:type="DialogueLink"><FromNodeID>0</FromNodeID><ToNodeID>1</ToNodeID></FlowChartLink>
        <FlowChartLink xsi:type="DialogueLink"><FromNodeID>0</FromNodeID><ToNodeID>2</ToNodeID></FlowChartLink>
      </Links>
      <Conditionals><Operator>And</Operator><Components /></Conditionals>
      <OnEnterScripts />
      <OnExitScripts />
      <OnUpdateScripts />
    </FlowChartNode>
    <FlowChartNode xsi:type="PlayerResponseNode">
      <NodeID>1</NodeID>
      <Links />
      <Conditionals>
        <Operator>And</Operator>
        <Components>
          <ExpressionComponent xsi:type="ConditionalCall">
            <Data>
              <FullName>Boolean IsInParty(Guid)</FullName>
              <Parameters><string>b1a7e800-0000-0000-0000-000000000000</string></Parameters>
            </Data>
            <Not>true</Not>
            <Operator>Or</Operator>
          </ExpressionComponent>
          <ExpressionComponent xsi:type="ConditionalExpression">
            <Operator>And</Operator>
            <Components>
              <ExpressionComponent xsi:type="ConditionalCall">
                <Data><FullName>Boolean IsDay()</FullName><Parameters /></Data>
                <Not>false</Not>
                <Operator>And</Operator>
              </ExpressionComponent>
            </Components>
          </ExpressionComponent>
        </Components>
      </Conditionals>
      <OnEnterScripts>
        <ScriptCall>
          <Data><FullName>Void SetGlobalValue(String, Int32)</FullName><Parameters><string>n_met</string><string>1</string></Parameters></Data>
        </ScriptCall>
      </OnEnterScripts>
    </FlowChartNode>
    <FlowChartNode xsi:type="BankNode">
      <NodeID>2</NodeID>
      <Links />
      <ChildNodeIDs><int>3</int><int>4</int></ChildNodeIDs>
    </FlowChartNode>
    <FlowChartNode xsi:type="TriggerConversationNode">
      <NodeID>3</NodeID>
      <ConversationFilename>conversations\companions\companion_eder.conversation</ConversationFilename>
      <StartNodeID>12</StartNodeID>
    </FlowChartNode>
    <FlowChartNode xsi:type="ScriptNode">
      <NodeID>4</NodeID>
    </FlowChartNode>
  </Nodes>
</ConversationData>"#;

    #[test]
    fn test_parse_sample_conversation() {
        let data = parse_conversation(SAMPLE).unwrap();
        assert_eq!(data.node_count(), 5);
        let ids: Vec<_> = data.iter().map(|n| n.node_id).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);

        let root = data.get_node(0).unwrap();
        assert!(root.is_root());
        assert_eq!(root.links, [Link { to_node_id: 1 }, Link { to_node_id: 2 }]);
        assert!(!root.has_conditional_calls());

        let response = data.get_node(1).unwrap();
        assert!(response.is_player_response());
        assert_eq!(response.conditionals.components().len(), 2);
        match &response.conditionals.components()[0] {
            ConditionalExpression::Call { not, operator, call } => {
                assert!(*not);
                assert_eq!(*operator, Operator::Or);
                assert_eq!(call.full_name, "Boolean IsInParty(Guid)");
                assert_eq!(call.parameters, ["b1a7e800-0000-0000-0000-000000000000"]);
            }
            other => panic!("expected call, got {other:?}"),
        }
        assert_eq!(response.conditionals.script_calls().len(), 2);
        assert_eq!(response.on_enter_scripts[0].parameters, ["n_met", "1"]);
        assert!(response.has_scripts());

        assert_eq!(data.get_node(2).unwrap().child_node_ids(), &[3, 4]);
        assert_eq!(
            data.get_node(3).unwrap().kind,
            NodeKind::Trigger {
                target_file: r"conversations\companions\companion_eder.conversation".to_string(),
                target_node_id: 12,
            }
        );
        assert_eq!(data.get_node(4).unwrap().kind, NodeKind::Generic);
    }

    #[test]
    fn test_wrong_root_rejected() {
        let err = parse_conversation("<StringTableFile />").unwrap_err();
        assert!(matches!(err, Error::UnexpectedRoot { .. }));
    }

    #[test]
    fn test_missing_node_id_rejected() {
        let xml = "<ConversationData><Nodes><FlowChartNode /></Nodes></ConversationData>";
        assert!(matches!(
            parse_conversation(xml),
            Err(Error::MissingElement { element: "NodeID", .. })
        ));
    }

    #[test]
    fn test_bad_link_target_rejected() {
        let xml = "<ConversationData><Nodes><FlowChartNode><NodeID>0</NodeID>\
                   <Links><FlowChartLink><ToNodeID>two</ToNodeID></FlowChartLink></Links>\
                   </FlowChartNode></Nodes></ConversationData>";
        assert!(matches!(parse_conversation(xml), Err(Error::InvalidNumber { .. })));
    }
}
