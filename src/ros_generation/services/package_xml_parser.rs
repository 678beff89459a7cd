use crate::ros_generation::domain::{
    BuildType, Condition, Person, RosDependency, RosPackageManifest, Url, VersionBounds,
};
use crate::shared::Result;
use roxmltree::{Document, Node, ParsingOptions};

/// Which dependency groups an element of package.xml feeds
#[derive(Debug, Clone, Copy)]
enum DependencyKind {
    Buildtool,
    BuildtoolExport,
    Build,
    BuildExport,
    Exec,
    Test,
    Doc,
}

/// PackageXmlParser - converts package.xml content into a RosPackageManifest
///
/// Understands manifest formats 1 (REP 127), 2 (REP 140) and 3 (REP 149).
pub struct PackageXmlParser;

impl PackageXmlParser {
    /// Parses the content of a package.xml file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The content is not well-formed XML
    /// - The root element is not `<package>`
    /// - `<name>` or `<version>` is missing or empty
    /// - A `condition` attribute cannot be parsed
    pub fn parse(content: &str) -> Result<RosPackageManifest> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(content, options)
            .map_err(|e| anyhow::anyhow!("Invalid XML: {}", e))?;

        let root = document.root_element();
        if root.tag_name().name() != "package" {
            anyhow::bail!(
                "Root element must be <package>, found <{}>",
                root.tag_name().name()
            );
        }

        let format = match root.attribute("format") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("Invalid package format attribute '{}'", raw))?,
            None => 1,
        };

        let mut manifest = RosPackageManifest {
            format,
            ..RosPackageManifest::default()
        };

        for child in root.children().filter(Node::is_element) {
            let tag = child.tag_name().name();
            match tag {
                "name" => manifest.name = element_text(&child),
                "version" => manifest.version = element_text(&child),
                "description" => {
                    let description = normalize_whitespace(&element_text(&child));
                    if !description.is_empty() {
                        manifest.description = Some(description);
                    }
                }
                "maintainer" => manifest.maintainers.push(parse_person(&child)),
                "author" => manifest.authors.push(parse_person(&child)),
                "license" => {
                    let license = element_text(&child);
                    if !license.is_empty() {
                        manifest.licenses.push(license);
                    }
                }
                "url" => {
                    let url = element_text(&child);
                    if !url.is_empty() {
                        manifest.urls.push(Url {
                            url,
                            kind: child.attribute("type").map(str::to_string),
                        });
                    }
                }
                "export" => {
                    if let Some(build_type) = parse_build_type(&child)? {
                        manifest.build_type = Some(build_type);
                    }
                }
                "depend" => {
                    let dependency = parse_dependency(&child)?;
                    push_dependency(&mut manifest, DependencyKind::Build, dependency.clone());
                    push_dependency(&mut manifest, DependencyKind::BuildExport, dependency.clone());
                    push_dependency(&mut manifest, DependencyKind::Exec, dependency);
                }
                "run_depend" => {
                    let dependency = parse_dependency(&child)?;
                    push_dependency(&mut manifest, DependencyKind::BuildExport, dependency.clone());
                    push_dependency(&mut manifest, DependencyKind::Exec, dependency);
                }
                other => {
                    if let Some(kind) = dependency_kind(other) {
                        let dependency = parse_dependency(&child)?;
                        push_dependency(&mut manifest, kind, dependency);
                    } else {
                        tracing::trace!(element = other, "ignoring package.xml element");
                    }
                }
            }
        }

        if manifest.name.is_empty() {
            anyhow::bail!("Missing required element <name>");
        }
        if manifest.version.is_empty() {
            anyhow::bail!("Missing required element <version>");
        }

        Ok(manifest)
    }
}

fn dependency_kind(tag: &str) -> Option<DependencyKind> {
    match tag {
        "buildtool_depend" => Some(DependencyKind::Buildtool),
        "buildtool_export_depend" => Some(DependencyKind::BuildtoolExport),
        "build_depend" => Some(DependencyKind::Build),
        "build_export_depend" => Some(DependencyKind::BuildExport),
        "exec_depend" => Some(DependencyKind::Exec),
        "test_depend" => Some(DependencyKind::Test),
        "doc_depend" => Some(DependencyKind::Doc),
        _ => None,
    }
}

fn push_dependency(manifest: &mut RosPackageManifest, kind: DependencyKind, dep: RosDependency) {
    let target = match kind {
        DependencyKind::Buildtool => &mut manifest.buildtool_depends,
        DependencyKind::BuildtoolExport => &mut manifest.buildtool_export_depends,
        DependencyKind::Build => &mut manifest.build_depends,
        DependencyKind::BuildExport => &mut manifest.build_export_depends,
        DependencyKind::Exec => &mut manifest.exec_depends,
        DependencyKind::Test => &mut manifest.test_depends,
        DependencyKind::Doc => &mut manifest.doc_depends,
    };
    target.push(dep);
}

fn element_text(node: &Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_person(node: &Node) -> Person {
    Person {
        name: element_text(node),
        email: node
            .attribute("email")
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string),
    }
}

fn parse_build_type(export: &Node) -> Result<Option<BuildType>> {
    let Some(node) = export
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "build_type")
    else {
        return Ok(None);
    };

    if let Some(raw) = node.attribute("condition") {
        tracing::debug!(
            condition = raw,
            "conditional <build_type> found; using its value unconditionally"
        );
    }

    let text = element_text(&node);
    if text.is_empty() {
        return Ok(None);
    }
    Ok(text.parse::<BuildType>().ok())
}

fn parse_dependency(node: &Node) -> Result<RosDependency> {
    let name = element_text(node);
    if name.is_empty() {
        anyhow::bail!("Empty <{}> element", node.tag_name().name());
    }

    let condition = match node.attribute("condition").map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(Condition::parse(raw).map_err(|e| {
            anyhow::anyhow!("Invalid condition on dependency '{}': {}", name, e)
        })?),
        _ => None,
    };

    let attr = |key: &str| {
        node.attribute(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    Ok(RosDependency {
        name,
        condition,
        version: VersionBounds {
            version_lt: attr("version_lt"),
            version_lte: attr("version_lte"),
            version_eq: attr("version_eq"),
            version_gte: attr("version_gte"),
            version_gt: attr("version_gt"),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FORMAT_3: &str = r#"<?xml version="1.0"?>
<?xml-model href="http://download.ros.org/schema/package_format3.xsd" schematypens="http://www.w3.org/2001/XMLSchema"?>
<package format="3">
  <name>demo_nodes</name>
  <version>0.20.3</version>
  <description>
    C++ nodes which were previously
    in the ros2/examples repository.
  </description>
  <maintainer email="jane@example.org">Jane Doe</maintainer>
  <license>Apache License 2.0</license>
  <url type="repository">https://github.com/ros2/demos</url>
  <author>John Roe</author>

  <buildtool_depend>ament_cmake</buildtool_depend>
  <depend>rclcpp</depend>
  <build_depend version_gte="1.2" version_lt="2">example_interfaces</build_depend>
  <exec_depend condition="$ROS_VERSION == 2">launch_ros</exec_depend>
  <test_depend>ament_lint_auto</test_depend>

  <export>
    <build_type>ament_cmake</build_type>
  </export>
</package>
"#;

    #[test]
    fn test_parse_format_3() {
        let manifest = PackageXmlParser::parse(FORMAT_3).unwrap();

        assert_eq!(manifest.format, 3);
        assert_eq!(manifest.name, "demo_nodes");
        assert_eq!(manifest.version, "0.20.3");
        assert_eq!(
            manifest.description.as_deref(),
            Some("C++ nodes which were previously in the ros2/examples repository.")
        );
        assert_eq!(manifest.maintainers.len(), 1);
        assert_eq!(manifest.maintainers[0].email.as_deref(), Some("jane@example.org"));
        assert_eq!(manifest.authors[0].name, "John Roe");
        assert_eq!(manifest.licenses, vec!["Apache License 2.0"]);
        assert_eq!(manifest.url("repository"), Some("https://github.com/ros2/demos"));
        assert_eq!(manifest.build_type, Some(BuildType::AmentCmake));

        let names = |deps: &[RosDependency]| deps.iter().map(|d| d.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&manifest.buildtool_depends), vec!["ament_cmake"]);
        assert_eq!(names(&manifest.build_depends), vec!["rclcpp", "example_interfaces"]);
        assert_eq!(names(&manifest.build_export_depends), vec!["rclcpp"]);
        assert_eq!(names(&manifest.exec_depends), vec!["rclcpp", "launch_ros"]);
        assert_eq!(names(&manifest.test_depends), vec!["ament_lint_auto"]);

        let bounded = &manifest.build_depends[1];
        assert_eq!(bounded.version.to_constraint().as_deref(), Some(">=1.2,<2"));

        let conditional = &manifest.exec_depends[1];
        let ros1 = HashMap::from([("ROS_VERSION".to_string(), "1".to_string())]);
        assert!(!conditional.applies(&ros1));
    }

    #[test]
    fn test_parse_format_1_run_depend() {
        let manifest = PackageXmlParser::parse(
            r#"<package>
  <name>legacy_pkg</name>
  <version>1.0.0</version>
  <description>Old style</description>
  <maintainer email="m@example.org">M</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <build_depend>roscpp</build_depend>
  <run_depend>roscpp</run_depend>
</package>"#,
        )
        .unwrap();

        assert_eq!(manifest.format, 1);
        assert!(manifest.build_type.is_none());
        assert_eq!(manifest.build_depends.len(), 1);
        assert_eq!(manifest.build_export_depends[0].name, "roscpp");
        assert_eq!(manifest.exec_depends[0].name, "roscpp");
    }

    #[test]
    fn test_parse_missing_name() {
        let result = PackageXmlParser::parse(
            r#"<package format="2"><version>1.0.0</version></package>"#,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("<name>"));
    }

    #[test]
    fn test_parse_missing_version() {
        let result =
            PackageXmlParser::parse(r#"<package format="2"><name>pkg</name></package>"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("<version>"));
    }

    #[test]
    fn test_parse_wrong_root() {
        let result = PackageXmlParser::parse("<manifest><name>x</name></manifest>");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("<package>"));
    }

    #[test]
    fn test_parse_malformed_xml() {
        let result = PackageXmlParser::parse("<package><name>x</name>");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid XML"));
    }

    #[test]
    fn test_parse_invalid_condition() {
        let result = PackageXmlParser::parse(
            r#"<package format="3">
  <name>pkg</name>
  <version>1.0.0</version>
  <depend condition="$ROS_VERSION ==">rclcpp</depend>
</package>"#,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("rclcpp"));
    }

    #[test]
    fn test_parse_empty_version_attributes_are_ignored() {
        let manifest = PackageXmlParser::parse(
            r#"<package format="2">
  <name>pkg</name>
  <version>1.0.0</version>
  <exec_depend version_gte="" version_lt="  ">foo</exec_depend>
</package>"#,
        )
        .unwrap();

        let bounds = &manifest.exec_depends[0].version;
        assert!(bounds.version_gte.is_none());
        assert!(bounds.version_lt.is_none());
        assert!(bounds.is_empty());
        assert_eq!(bounds.to_constraint(), None);
    }

    #[test]
    fn test_parse_later_export_keeps_build_type() {
        let manifest = PackageXmlParser::parse(
            r#"<package format="3">
  <name>pkg</name>
  <version>1.0.0</version>
  <export>
    <build_type>ament_python</build_type>
  </export>
  <export>
    <architecture_independent/>
  </export>
</package>"#,
        )
        .unwrap();

        assert_eq!(manifest.build_type, Some(BuildType::AmentPython));
    }
}
