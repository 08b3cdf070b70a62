//! Whole-file parsing: declarations the symbol layer depends on.

use thizer::base::FileId;
use thizer::hir::{MemberKind, extract_classes};
use thizer::parser::{ParseOptions, parse};
use thizer::syntax::{ClassLikeKind, Item, Visibility};

const CONTROLLER: &str = r#"<?php
declare(strict_types=1);

namespace App\Http\Controllers;

use App\Models\{User, Post as Article};
use Illuminate\Http\Request;

/**
 * Handles user pages.
 */
#[Route('/users')]
final class UserController extends Controller implements HasMiddleware
{
    use AuthorizesRequests, ValidatesRequests;

    public const PER_PAGE = 15;
    protected static ?string $layout = null;
    var $legacy;

    public function __construct(
        private readonly UserRepository $users,
        protected Request $request,
    ) {}

    /** List users. */
    public function index(int $page = 1, string ...$filters): View
    {
        $query = User::query();
        $html = <<<HTML
            <p>{$page}</p>
        HTML;
        return view('users.index', compact('query'));
    }

    protected function guard() {}
}
"#;

#[test]
fn test_controller_structure() {
    let unit = parse(CONTROLLER, &ParseOptions::default()).expect("parse");
    let namespace = unit
        .items
        .iter()
        .find_map(|item| match item {
            Item::Namespace(ns) => Some(ns),
            _ => None,
        })
        .expect("namespace");
    assert_eq!(namespace.name.as_deref(), Some("App\\Http\\Controllers"));
    assert!(!namespace.braced);

    let (ns, class) = unit.class_likes()[0];
    assert_eq!(ns, Some("App\\Http\\Controllers"));
    assert_eq!(class.kind, ClassLikeKind::Class);
    assert!(class.is_final);
    assert_eq!(class.extends, vec!["Controller"]);
    assert_eq!(class.implements, vec!["HasMiddleware"]);
}

#[test]
fn test_controller_symbols() {
    let unit = parse(CONTROLLER, &ParseOptions::default()).expect("parse");
    let classes = extract_classes(FileId::new(0), &unit);
    let class = &classes[0];
    assert_eq!(&*class.fqn, "App\\Http\\Controllers\\UserController");
    assert_eq!(
        class.parent.as_ref().map(|p| &*p.fqn),
        Some("App\\Http\\Controllers\\Controller")
    );
    assert_eq!(class.traits.len(), 2);

    let members: Vec<_> = class
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.kind, m.visibility))
        .collect();
    assert_eq!(
        members,
        vec![
            ("PER_PAGE", MemberKind::ClassConstant, Visibility::Public),
            ("layout", MemberKind::Property, Visibility::Protected),
            ("legacy", MemberKind::Variable, Visibility::Public),
            ("__construct", MemberKind::Method, Visibility::Public),
            ("users", MemberKind::Property, Visibility::Private),
            ("request", MemberKind::Property, Visibility::Protected),
            ("index", MemberKind::Method, Visibility::Public),
            ("guard", MemberKind::Method, Visibility::Protected),
        ]
    );

    let index = class.members.iter().find(|m| m.name == "index").expect("index");
    assert_eq!(index.params, vec!["page", "filters"]);
    assert_eq!(index.type_hint.as_deref(), Some("View"));
    assert!(index.doc.as_deref().is_some_and(|d| d.contains("List users.")));
}

#[test]
fn test_interface_trait_enum() {
    let source = "<?php
interface Shape extends Countable, Stringable { public function area(): float; }
trait Named { private string $name = ''; }
enum Suit: string {
    case Hearts = 'H';
    case Spades = 'S';
    public function label(): string { return ucfirst($this->name); }
}";
    let unit = parse(source, &ParseOptions::default()).expect("parse");
    let classes = extract_classes(FileId::new(0), &unit);
    let kinds: Vec<_> = classes.iter().map(|c| (c.name.as_str(), c.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("Shape", ClassLikeKind::Interface),
            ("Named", ClassLikeKind::Trait),
            ("Suit", ClassLikeKind::Enum),
        ]
    );
    assert!(classes[0].parent.is_none());
    assert_eq!(classes[0].interfaces.len(), 2);
    let cases: Vec<_> = classes[2]
        .members
        .iter()
        .filter(|m| m.kind == MemberKind::ClassConstant)
        .map(|m| m.value_raw.as_deref())
        .collect();
    assert_eq!(cases, vec![Some("'H'"), Some("'S'")]);
}

#[test]
fn test_template_file_with_inline_html() {
    let source = "<html>
<?php foreach ($items as $item): ?>
  <li><?= $item ?></li>
<?php endforeach; ?>
</html>";
    assert!(parse(source, &ParseOptions::default()).is_ok());
}

#[test]
fn test_braced_namespaces() {
    let source = "<?php
namespace One {
    class A {}
}
namespace Two {
    class A extends \\One\\A {}
}";
    let unit = parse(source, &ParseOptions::default()).expect("parse");
    let classes = extract_classes(FileId::new(0), &unit);
    assert_eq!(&*classes[0].fqn, "One\\A");
    assert_eq!(&*classes[1].fqn, "Two\\A");
    assert_eq!(classes[1].parent.as_ref().map(|p| &*p.fqn), Some("One\\A"));
}
