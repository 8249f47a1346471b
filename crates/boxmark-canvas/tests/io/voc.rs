use std::fs;

use boxmark_canvas::voc::{find_by_label, parse_annotation, sidecar_path, write_annotation};
use boxmark_canvas::{AnnotationStore, BoundingBox, PascalVocStore, Vector2Int};

#[test]
fn test_sidecar_sits_next_to_image() {
    let path = sidecar_path(std::path::Path::new("/data/set/img_01.jpg"));
    assert_eq!(path, std::path::Path::new("/data/set/img_01.xml"));
}

#[test]
fn test_edge_boxes_are_truncated() {
    let size = Vector2Int::new(100, 80);
    let boxes = vec![
        BoundingBox::new("inside", 5, 5, 50, 50),
        BoundingBox::new("left", 1, 5, 50, 50),
        BoundingBox::new("top", 5, 1, 50, 50),
        BoundingBox::new("right", 5, 5, 100, 50),
        BoundingBox::new("bottom", 5, 5, 50, 80),
    ];
    let xml = write_annotation(std::path::Path::new("img.png"), size, 3, &boxes);
    assert_eq!(xml.matches("<truncated>1</truncated>").count(), 4);
    assert_eq!(xml.matches("<truncated>0</truncated>").count(), 1);
    assert_eq!(xml.matches("<difficult>0</difficult>").count(), 5);
    assert!(xml.contains("<segmented>0</segmented>"));
}

#[test]
fn test_reads_labelimg_style_file() {
    let xml = "<annotation>\n\t<folder>imgs</folder>\n\t<filename>a.jpg</filename>\n\
        \t<size>\n\t\t<width>640</width>\n\t\t<height>480</height>\n\t\t<depth>3</depth>\n\t</size>\n\
        \t<object>\n\t\t<name>person</name>\n\t\t<pose>Unspecified</pose>\n\t\t<truncated>0</truncated>\n\
        \t\t<difficult>0</difficult>\n\t\t<bndbox>\n\t\t\t<xmin>48</xmin>\n\t\t\t<ymin>240</ymin>\n\
        \t\t\t<xmax>195</xmax>\n\t\t\t<ymax>371</ymax>\n\t\t</bndbox>\n\t</object>\n</annotation>\n";
    let boxes = parse_annotation(xml).unwrap();
    assert_eq!(boxes, vec![BoundingBox::new("person", 48, 240, 195, 371)]);
    assert!(find_by_label(&boxes, "person"));
}

#[test]
fn test_store_overwrites_previous_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("photo.jpg");
    let store = PascalVocStore::new();

    store
        .save(&image, Vector2Int::new(50, 50), &[BoundingBox::new("a", 2, 2, 10, 10)])
        .unwrap();
    store.save(&image, Vector2Int::new(50, 50), &[]).unwrap();

    assert!(store.load(&image).is_empty());
    let text = fs::read_to_string(dir.path().join("photo.xml")).unwrap();
    assert!(text.contains("<filename>photo.jpg</filename>"));
    assert!(!text.contains("<object>"));
}

#[test]
fn test_read_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = PascalVocStore::with_depth(1);
    assert!(store.read(&dir.path().join("missing.xml")).is_err());

    let path = dir.path().join("bad.xml");
    fs::write(&path, "<annotation><object><bndbox></bndbox></object></annotation>").unwrap();
    assert!(store.read(&path).is_err());
}
