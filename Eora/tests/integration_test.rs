use eora::prelude::*;
use std::fs;
use tempfile::tempdir;

const CONVERSATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ConversationData xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Nodes>
    <FlowChartNode xsi:type="TalkNode">
      <NodeID>0</NodeID>
      <Links><FlowChartLink><FromNodeID>0</FromNodeID><ToNodeID>1</ToNodeID></FlowChartLink></Links>
    </FlowChartNode>
    <FlowChartNode xsi:type="TalkNode">
      <NodeID>1</NodeID>
      <Links />
    </FlowChartNode>
  </Nodes>
</ConversationData>"#;

#[test]
fn test_find_conversation_files() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("companions");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("b.conversation"), CONVERSATION).unwrap();
    fs::write(dir.path().join("a.CONVERSATION"), CONVERSATION).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

    let files = find_conversation_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a.CONVERSATION"));
    assert!(files[1].ends_with("companions/b.conversation"));
}

#[test]
fn test_find_in_missing_directory_fails() {
    let dir = tempdir().unwrap();
    assert!(find_conversation_files(dir.path().join("missing")).is_err());
}

#[test]
fn test_read_conversation_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.conversation");
    fs::write(&path, format!("\u{feff}{CONVERSATION}")).unwrap();

    let data = read_conversation(&path).unwrap();
    assert_eq!(data.node_count(), 2);
    assert!(data.get_node(0).unwrap().is_root());
    assert_eq!(data.get_node(0).unwrap().links[0].to_node_id, 1);
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = read_conversation(dir.path().join("nope.conversation")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_read_string_table_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.stringtable");
    fs::write(
        &path,
        "<StringTableFile><Name>x</Name><Entries><Entry><ID>1</ID><DefaultText>Hi</DefaultText></Entry></Entries></StringTableFile>",
    )
    .unwrap();

    let table = read_string_table(&path).unwrap();
    assert_eq!(table.get(1).map(ToString::to_string).as_deref(), Some("Hi"));
}
