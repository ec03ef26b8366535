//! Demo flattening against real (temporary) file trees.

use std::path::Path;

use docsmith_demos::{flatten_demo, flatten_demo_variants};
use docsmith_types::PlainHighlighter;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn flattens_a_demo_with_nested_imports() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "demo/index.tsx",
        "import { Accordion } from './accordion';\nimport '../shared/theme.css';\n\nexport default function Demo() {\n  return <Accordion />;\n}\n",
    );
    write(
        dir.path(),
        "demo/accordion.tsx",
        "import { helper } from '../shared/utils';\n\nexport function Accordion() {\n  return helper();\n}\n",
    );
    write(dir.path(), "shared/utils.ts", "export function helper() {}\n");
    write(dir.path(), "shared/theme.css", ".root { color: red; }\n");

    let bundle = flatten_demo(
        "css-modules",
        &dir.path().join("demo/index.tsx"),
        &PlainHighlighter,
    )
    .await
    .unwrap();

    assert_eq!(bundle.variant, "css-modules");
    assert_eq!(bundle.entry, "index.tsx");
    let names: Vec<&str> = bundle.files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, ["index.tsx", "accordion.tsx", "theme.css", "utils.ts"]);

    let entry = &bundle.files[0];
    // Imports that left the demo directory now point at flattened siblings.
    assert!(entry.source.contains("from './accordion'"));
    assert!(entry.source.contains("import './theme.css'"));
    let accordion = &bundle.files[1];
    assert!(accordion.source.contains("from './utils'"));
    assert_eq!(accordion.language, "tsx");
    assert_eq!(bundle.files[2].language, "css");
}

#[tokio::test]
async fn circular_imports_terminate() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.ts", "import { b } from './b';\nexport const a = 1;\n");
    write(dir.path(), "b.ts", "import { a } from './a';\nexport const b = 2;\n");

    let bundle = flatten_demo("plain", &dir.path().join("a.ts"), &PlainHighlighter)
        .await
        .unwrap();
    assert_eq!(bundle.files.len(), 2);
}

#[tokio::test]
async fn unresolvable_imports_are_left_alone() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.ts",
        "import { gone } from './missing';\nexport const x = gone;\n",
    );

    let bundle = flatten_demo("plain", &dir.path().join("index.ts"), &PlainHighlighter)
        .await
        .unwrap();
    assert_eq!(bundle.files.len(), 1);
    assert!(bundle.files[0].source.contains("from './missing'"));
}

#[tokio::test]
async fn name_collisions_get_parent_prefixes() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.ts",
        "import { a } from './one/utils';\nimport { b } from './two/utils';\n",
    );
    write(dir.path(), "one/utils.ts", "export const a = 1;\n");
    write(dir.path(), "two/utils.ts", "export const b = 2;\n");

    let bundle = flatten_demo("plain", &dir.path().join("index.ts"), &PlainHighlighter)
        .await
        .unwrap();
    let names: Vec<&str> = bundle.files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, ["index.ts", "utils.ts", "two-utils.ts"]);
    let entry = &bundle.files[0];
    assert!(entry.source.contains("from './utils'"));
    assert!(entry.source.contains("from './two-utils'"));
}

#[tokio::test]
async fn variant_directories_bundle_independently() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "css-modules/index.tsx",
        "import './index.module.css';\nexport default function Demo() {}\n",
    );
    write(dir.path(), "css-modules/index.module.css", ".root {}\n");
    write(
        dir.path(),
        "tailwind/index.tsx",
        "export default function Demo() {}\n",
    );
    // A variant directory without an entry point is skipped, not fatal.
    std::fs::create_dir_all(dir.path().join("broken")).unwrap();

    let bundles = flatten_demo_variants(dir.path(), &PlainHighlighter)
        .await
        .unwrap();
    let variants: Vec<&str> = bundles
        .iter()
        .map(|bundle| bundle.variant.as_str())
        .collect();
    assert_eq!(variants, ["css-modules", "tailwind"]);
    assert_eq!(bundles[0].files.len(), 2);
}
