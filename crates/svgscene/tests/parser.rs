use float_cmp::approx_eq;
use svgscene::{
    Attribute, Color, Diagnostic, Document, Error, LineCap, NodeKind, Options, Paint, PathSegment,
    SimpleTextLayouter, Size, SyntaxErrorPolicy, Token, TransportError,
};

fn parse(svg: &str) -> Document {
    parse_with(svg, &Options::default())
}

fn parse_with(svg: &str, opt: &Options) -> Document {
    let mut layouter = SimpleTextLayouter::new();
    Document::from_str(svg, opt, &mut layouter).unwrap()
}

fn try_parse(svg: &str, opt: &Options) -> Result<Document, Error> {
    let mut layouter = SimpleTextLayouter::new();
    Document::from_str(svg, opt, &mut layouter)
}

fn lenient() -> Options {
    Options {
        syntax_errors: SyntaxErrorPolicy::SkipElement,
        ..Options::default()
    }
}

fn red() -> Paint {
    Paint::from_color(Color::from_rgb8(255, 0, 0))
}

#[test]
fn size_detection_1() {
    let svg = "<svg viewBox='0 0 10 20' xmlns='http://www.w3.org/2000/svg'/>";
    let doc = parse(svg);
    assert_eq!(doc.size(), Size::from_wh(10.0, 20.0).unwrap());
}

#[test]
fn size_detection_2() {
    let svg =
        "<svg width='30' height='40' viewBox='0 0 10 20' xmlns='http://www.w3.org/2000/svg'/>";
    let doc = parse(svg);
    assert_eq!(doc.size(), Size::from_wh(30.0, 40.0).unwrap());
}

#[test]
fn size_detection_3() {
    let svg = "<svg width='1in' xmlns='http://www.w3.org/2000/svg'/>";
    let opt = Options {
        dpi: 72.0,
        ..Options::default()
    };
    let doc = parse_with(svg, &opt);
    assert_eq!(doc.size(), Size::from_wh(72.0, 100.0).unwrap());
}

#[test]
fn device_dpi() {
    let svg = "
    <svg width='1in' height='0.5in' xmlns='http://www.w3.org/2000/svg'>
        <rect width='1in' height='1pt' stroke-width='1in'/>
    </svg>
    ";

    let mut opt = Options::default();
    opt.set_device_dpi(72.0, 120.0);
    assert_eq!(opt.dpi, 96.0);

    let doc = parse_with(svg, &opt);
    assert_eq!(doc.size(), Size::from_wh(96.0, 48.0).unwrap());

    let rect = &doc.root().children()[0];
    assert_eq!(
        *rect.kind(),
        NodeKind::Rect {
            x: 0.0,
            y: 0.0,
            width: 96.0,
            height: 96.0 / 72.0,
        }
    );
    assert_eq!(rect.stroke_width(), 96.0);
}

#[test]
fn length_with_e_suffix() {
    let svg = "<svg width='50e' height='20E' xmlns='http://www.w3.org/2000/svg'/>";
    let doc = parse(svg);
    assert_eq!(doc.size(), Size::from_wh(50.0, 20.0).unwrap());
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn invalid_view_box() {
    let svg = "<svg viewBox='0 0 0 20' width='10' height='10' xmlns='http://www.w3.org/2000/svg'/>";
    let doc = parse(svg);
    assert_eq!(
        *doc.root().kind(),
        NodeKind::Viewport {
            view_box: None,
            width: 10.0,
            height: 10.0,
        }
    );
    assert_eq!(doc.diagnostics().len(), 1);
}

#[test]
fn view_box_scale() {
    let svg = "
    <svg width='200' height='50' viewBox='0 0 100 50' xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10'/>
    </svg>
    ";

    let doc = parse(svg);
    let ts = doc.root().transform().unwrap();
    assert!(approx_eq!(f64, ts.a, 2.0, ulps = 4));
    assert!(approx_eq!(f64, ts.d, 1.0, ulps = 4));
    assert_eq!(ts.apply(10.0, 10.0), (20.0, 10.0));
}

#[test]
fn view_box_offset() {
    let svg = "<svg width='20' height='20' viewBox='5 5 10 10' xmlns='http://www.w3.org/2000/svg'/>";
    let doc = parse(svg);
    let ts = doc.root().transform().unwrap();
    assert_eq!(ts.apply(5.0, 5.0), (0.0, 0.0));
    assert_eq!(ts.apply(15.0, 15.0), (20.0, 20.0));
}

#[test]
fn nested_viewport() {
    let svg = "
    <svg width='100' height='100' xmlns='http://www.w3.org/2000/svg'>
        <svg x='10' y='20' width='50' height='50' viewBox='0 0 10 10'/>
    </svg>
    ";

    let doc = parse(svg);
    let nested = &doc.root().children()[0];
    assert!(nested.fill().is_none());
    let ts = nested.transform().unwrap();
    assert_eq!(ts.apply(0.0, 0.0), (10.0, 20.0));
    assert_eq!(ts.apply(1.0, 1.0), (15.0, 25.0));
}

#[test]
fn nested_viewport_with_transform() {
    let svg = "
    <svg width='100' height='100' xmlns='http://www.w3.org/2000/svg'>
        <svg x='10' y='20' transform='scale(2)'/>
    </svg>
    ";

    let doc = parse(svg);
    let nested = &doc.root().children()[0];
    assert_eq!(
        *nested.kind(),
        NodeKind::Viewport {
            view_box: None,
            width: 100.0,
            height: 100.0,
        }
    );

    // The position is applied first.
    let ts = nested.transform().unwrap();
    assert_eq!(ts.apply(1.0, 1.0), (22.0, 42.0));
}

#[test]
fn transform_order() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='1' height='1' transform='translate(10,0) scale(2)'/>
    </svg>
    ";

    let doc = parse(svg);
    let ts = doc.root().children()[0].transform().unwrap();
    assert_eq!(ts.apply(1.0, 0.0), (12.0, 0.0));
}

#[test]
fn no_transform() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><g><rect width='1' height='1'/></g></svg>";
    let doc = parse(svg);
    let g = &doc.root().children()[0];
    assert_eq!(g.transform(), None);
    assert_eq!(g.children()[0].transform(), None);
}

#[test]
fn inherited_fill() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g fill='red'>
            <rect width='10' height='10'/>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    let g = &doc.root().children()[0];
    assert_eq!(g.fill(), None);
    assert_eq!(g.stroke(), None);
    assert_eq!(g.children()[0].fill(), Some(red()));
    assert!(g.children()[0].raw_styles().is_empty());
}

#[test]
fn explicit_none_fill() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g fill='red'>
            <rect width='10' height='10' fill='none'/>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    let rect = &doc.root().children()[0].children()[0];
    assert_eq!(rect.fill(), Some(Paint::None));
}

#[test]
fn default_paint() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><rect width='1' height='1'/></svg>";
    let doc = parse(svg);
    let rect = &doc.root().children()[0];
    assert_eq!(rect.fill(), Some(Paint::from_color(Color::black())));
    assert_eq!(rect.stroke(), Some(Paint::None));
    assert_eq!(rect.stroke_width(), 1.0);
    assert_eq!(rect.stroke_cap(), LineCap::Butt);
}

#[test]
fn nearest_ancestor_wins() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' fill='blue'>
        <g fill='red'>
            <g>
                <rect width='10' height='10'/>
            </g>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    let rect = &doc.root().children()[0].children()[0].children()[0];
    assert_eq!(rect.fill(), Some(red()));
}

#[test]
fn style_overrides_attribute() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10' fill='blue' style='fill: red ; stroke-width:5'/>
    </svg>
    ";

    let doc = parse(svg);
    let rect = &doc.root().children()[0];
    assert_eq!(rect.fill(), Some(red()));
    assert_eq!(rect.stroke_width(), 5.0);
    assert_eq!(rect.raw_styles()["fill"], "red");
}

#[test]
fn inherit_keyword() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g stroke='red'>
            <rect width='10' height='10' stroke='inherit'/>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    let rect = &doc.root().children()[0].children()[0];
    assert_eq!(rect.stroke(), Some(red()));
}

#[test]
fn fill_opacity() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g fill-opacity='0.5'>
            <rect width='10' height='10' fill='#ff000080'/>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    let rect = &doc.root().children()[0].children()[0];
    match rect.fill() {
        Some(Paint::Color { color, opacity }) => {
            assert_eq!(opacity, 0.5);
            assert!(approx_eq!(f32, color.alpha, 128.0 / 255.0 * 0.5, ulps = 4));
            assert_eq!(color.red, 1.0);
        }
        _ => unreachable!(),
    }
}

#[test]
fn opacity_is_clamped() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10' stroke='red' stroke-opacity='5'/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.root().children()[0].stroke(), Some(red()));
}

#[test]
fn unresolved_color() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10' fill='url(#lg1)' stroke='qwe'/>
    </svg>
    ";

    let doc = parse(svg);
    let rect = &doc.root().children()[0];
    assert_eq!(rect.fill(), Some(Paint::from_color(Color::black())));
    assert_eq!(rect.stroke(), Some(Paint::None));
    assert_eq!(
        doc.diagnostics()[0],
        Diagnostic::UnresolvedColor {
            element: "rect".to_string(),
            property: "fill".to_string(),
            value: "url(#lg1)".to_string(),
        }
    );
    assert_eq!(doc.diagnostics().len(), 2);
}

#[test]
fn stroke_properties() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g stroke-width='1in' stroke-linecap='round'>
            <line x2='10' stroke='red'/>
            <line x2='10' stroke-linecap='qwe' stroke-width='-1'/>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    let g = &doc.root().children()[0];
    assert_eq!(g.children()[0].stroke_width(), 96.0);
    assert_eq!(g.children()[0].stroke_cap(), LineCap::Round);
    assert_eq!(g.children()[1].stroke_width(), 1.0);
    assert_eq!(g.children()[1].stroke_cap(), LineCap::Butt);
    assert_eq!(doc.diagnostics().len(), 2);
}

#[test]
fn shapes() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect x='1' y='2' width='3' height='4'/>
        <circle cx='1' cy='2' r='3'/>
        <ellipse rx='3' ry='4'/>
        <line x1='1' y1='2' x2='3' y2='4'/>
        <path d='M10 10 L20 20 L30 10 Z'/>
        <polyline points='0 0 10 10'/>
    </svg>
    ";

    let doc = parse(svg);
    let kinds: Vec<_> = doc.root().children().iter().map(|n| n.kind().clone()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Rect {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
            },
            NodeKind::Circle {
                cx: 1.0,
                cy: 2.0,
                r: 3.0,
            },
            NodeKind::Ellipse {
                cx: 0.0,
                cy: 0.0,
                rx: 3.0,
                ry: 4.0,
            },
            NodeKind::Line {
                x1: 1.0,
                y1: 2.0,
                x2: 3.0,
                y2: 4.0,
            },
            NodeKind::Path {
                segments: vec![
                    PathSegment::MoveTo { x: 10.0, y: 10.0 },
                    PathSegment::LineTo { x: 20.0, y: 20.0 },
                    PathSegment::LineTo { x: 30.0, y: 10.0 },
                    PathSegment::ClosePath,
                ]
            },
            NodeKind::Path {
                segments: vec![
                    PathSegment::MoveTo { x: 0.0, y: 0.0 },
                    PathSegment::LineTo { x: 10.0, y: 10.0 },
                ]
            },
        ]
    );
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn missing_required_attribute() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10'/>
        <circle r='5'/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.root().children().len(), 1);
    assert_eq!(doc.root().children()[0].tag(), "circle");
    assert_eq!(
        doc.diagnostics(),
        &[Diagnostic::MissingRequiredAttribute {
            element: "rect".to_string(),
            attribute: "height".to_string(),
        }]
    );
}

#[test]
fn dropped_node_descendants() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle r='-5'>
            <rect width='10' height='10'/>
        </circle>
        <g/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.root().children().len(), 1);
    assert_eq!(*doc.root().children()[0].kind(), NodeKind::Group);
    assert_eq!(doc.diagnostics().len(), 1);
}

#[test]
fn unknown_element() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <foo fill='red'>
            <rect width='10' height='10'/>
        </foo>
    </svg>
    ";

    let doc = parse(svg);
    let foo = &doc.root().children()[0];
    assert_eq!(foo.tag(), "foo");
    assert_eq!(*foo.kind(), NodeKind::Group);
    assert_eq!(foo.children()[0].fill(), Some(red()));
}

#[test]
fn foreign_namespace() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com'>
        <x:foo><rect width='10' height='10'/></x:foo>
        <rect width='10' height='10'/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.root().descendants().count(), 2);
}

#[test]
fn malformed_path_strict() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path d='M 10 20 L 30'/>
    </svg>
    ";

    match try_parse(svg, &Options::default()) {
        Err(Error::InvalidSyntax {
            element, attribute, ..
        }) => {
            assert_eq!(element, "path");
            assert_eq!(attribute, "d");
        }
        _ => unreachable!(),
    }
}

#[test]
fn malformed_path_lenient() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path d='M 10 20 L 30'/>
        <path d='M 10 20 L 30 40'/>
    </svg>
    ";

    let doc = parse_with(svg, &lenient());
    assert_eq!(doc.root().children().len(), 1);
    assert!(matches!(
        doc.diagnostics()[0],
        Diagnostic::SkippedElement { ref attribute, .. } if attribute == "d"
    ));
}

#[test]
fn missing_path_data() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><path/></svg>";
    let doc = parse(svg);
    assert!(doc.root().children().is_empty());
    assert_eq!(doc.diagnostics().len(), 1);
}

#[test]
fn malformed_transform() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='translate(10'>
            <rect width='10' height='10'/>
        </g>
        <rect width='10' height='10' transform='skewX(10) qwe(1)'/>
    </svg>
    ";

    assert!(matches!(
        try_parse(svg, &Options::default()),
        Err(Error::InvalidSyntax { .. })
    ));

    let doc = parse_with(svg, &lenient());
    assert!(doc.root().children().is_empty());
    assert_eq!(doc.diagnostics().len(), 2);
}

#[test]
fn malformed_style() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10' style='fill:red; stroke'/>
    </svg>
    ";

    match try_parse(svg, &Options::default()) {
        Err(Error::InvalidSyntax {
            attribute, error, ..
        }) => {
            assert_eq!(attribute, "style");
            assert_eq!(error, svgscene::scenetypes::Error::UnexpectedData(11));
        }
        _ => unreachable!(),
    }
}

#[test]
fn empty_style_declarations() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10' style=';fill:;:red;;fill:red;'/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.root().children()[0].fill(), Some(red()));
}

#[test]
fn no_root_element() {
    let svg = "<g xmlns='http://www.w3.org/2000/svg'><rect width='10' height='10'/></g>";
    assert!(matches!(
        try_parse(svg, &Options::default()),
        Err(Error::NoRootElement)
    ));
}

#[test]
fn malformed_xml() {
    assert!(matches!(
        try_parse("<svg", &Options::default()),
        Err(Error::ParsingFailed(_))
    ));
}

#[test]
fn simple_text() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text x='5' y='10' font-size='20'>  Hello
          world  </text>
    </svg>
    ";

    let doc = parse(svg);
    let text = &doc.root().children()[0];
    match text.kind() {
        NodeKind::Text {
            content,
            baseline_offset,
            layout,
        } => {
            assert_eq!(content, "Hello world");
            assert_eq!(*baseline_offset, 16.0);
            assert!(layout.is_some());
        }
        _ => unreachable!(),
    }

    assert_eq!(text.transform().unwrap().apply(0.0, 0.0), (5.0, 10.0));
    assert_eq!(text.fill(), Some(Paint::from_color(Color::black())));
}

#[test]
fn preserved_text() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xml:space='preserve'>
        <text> a  b </text>
    </svg>
    ";

    let doc = parse(svg);
    match doc.root().children()[0].kind() {
        NodeKind::Text { content, .. } => assert_eq!(content, " a  b "),
        _ => unreachable!(),
    }
}

#[test]
fn nested_text_elements_are_ignored() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text>a<tspan>b</tspan>c</text>
    </svg>
    ";

    let doc = parse(svg);
    let text = &doc.root().children()[0];
    match text.kind() {
        NodeKind::Text { content, .. } => assert_eq!(content, "ac"),
        _ => unreachable!(),
    }
    assert_eq!(text.children()[0].tag(), "tspan");
}

#[test]
fn text_request() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' font-family=\"'Noto Sans', Arial\">
        <text font-weight='bold' font-style='italic'>Text</text>
    </svg>
    ";

    let mut layouter = SimpleTextLayouter::with_families(["Arial"]);
    let doc = Document::from_str(svg, &Options::default(), &mut layouter).unwrap();
    match doc.root().children()[0].kind() {
        NodeKind::Text {
            layout: Some(handle),
            ..
        } => {
            let text = layouter.get(*handle).unwrap();
            assert_eq!(text.family, "Arial");
            assert_eq!(text.size, 12.0);
            assert_eq!(text.content, "Text");
        }
        _ => unreachable!(),
    }
}

#[test]
fn text_default_font_fallback() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text font-family='Noto Sans'>Text</text>
    </svg>
    ";

    let opt = Options {
        font_family: "Arial".to_string(),
        ..Options::default()
    };
    let mut layouter = SimpleTextLayouter::with_families(["Arial"]);
    let doc = Document::from_str(svg, &opt, &mut layouter).unwrap();
    assert!(doc.diagnostics().is_empty());
    assert_eq!(layouter.len(), 1);
}

#[test]
fn unresolved_font() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text font-family='Noto Sans'>Text</text>
    </svg>
    ";

    let mut layouter = SimpleTextLayouter::with_families(["Arial"]);
    let doc = Document::from_str(svg, &Options::default(), &mut layouter).unwrap();
    assert_eq!(
        *doc.root().children()[0].kind(),
        NodeKind::Text {
            content: "Text".to_string(),
            baseline_offset: 0.0,
            layout: None,
        }
    );
    assert_eq!(
        doc.diagnostics(),
        &[Diagnostic::UnresolvedFont {
            element: "text".to_string(),
            families: vec!["Noto Sans".to_string()],
        }]
    );
}

#[test]
fn idempotence() {
    let svg = "
    <svg width='200' height='100' viewBox='0 0 100 50' xmlns='http://www.w3.org/2000/svg'>
        <g fill='red' transform='rotate(30 5 5)'>
            <rect width='10' height='10' stroke='#00ff0080'/>
            <path d='M10-20A5.5.3-4 110-.1s1 2 3 4'/>
            <text y='20'>Text</text>
        </g>
    </svg>
    ";

    let doc1 = parse(svg);
    let doc2 = parse(svg);
    assert_eq!(doc1.root(), doc2.root());
    assert_eq!(doc1.size(), doc2.size());
}

#[test]
fn svgz() {
    use std::io::Write;

    let svg = "<svg width='10' height='20' xmlns='http://www.w3.org/2000/svg'/>";
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(svg.as_bytes()).unwrap();
    let data = encoder.finish().unwrap();

    let mut layouter = SimpleTextLayouter::new();
    let doc = Document::from_data(&data, &Options::default(), &mut layouter).unwrap();
    assert_eq!(doc.size(), Size::from_wh(10.0, 20.0).unwrap());
}

#[test]
fn not_utf8() {
    let mut layouter = SimpleTextLayouter::new();
    let res = Document::from_data(&[0xff, 0xfe, 0x00], &Options::default(), &mut layouter);
    assert!(matches!(res, Err(Error::NotAnUtf8Str)));
}

fn start<'a>(name: &'a str, attributes: &[(&'a str, &'a str)], self_closing: bool) -> Token<'a> {
    Token::Start {
        name,
        attributes: attributes
            .iter()
            .map(|&(n, v)| Attribute::new(n, v))
            .collect(),
        self_closing,
    }
}

fn from_tokens(tokens: Vec<Token>) -> Result<Document, Error> {
    let mut layouter = SimpleTextLayouter::new();
    Document::from_tokens(
        tokens.into_iter().map(Ok),
        &Options::default(),
        &mut layouter,
    )
}

#[test]
fn tokens_before_and_after_root() {
    let tokens = vec![
        start("rect", &[("width", "1"), ("height", "1")], true),
        start("svg", &[], false),
        start("circle", &[("r", "1")], true),
        Token::End("svg"),
        start("rect", &[("width", "1"), ("height", "1")], true),
    ];

    let doc = from_tokens(tokens).unwrap();
    assert_eq!(doc.root().descendants().count(), 2);
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn truncated_stream() {
    let tokens = vec![
        start("svg", &[], false),
        start("g", &[("fill", "red")], false),
        start("rect", &[("width", "1"), ("height", "1")], true),
    ];

    let doc = from_tokens(tokens).unwrap();
    let g = &doc.root().children()[0];
    assert_eq!(g.children()[0].fill(), Some(red()));
    assert_eq!(
        doc.diagnostics(),
        &[Diagnostic::TruncatedStream { open_elements: 2 }]
    );
}

#[test]
fn empty_stream() {
    assert!(matches!(from_tokens(Vec::new()), Err(Error::NoRootElement)));
}

#[test]
fn transport_error() {
    let tokens = vec![
        Ok(start("svg", &[], false)),
        Err(TransportError::ReadFailed("connection reset".to_string())),
    ];

    let mut layouter = SimpleTextLayouter::new();
    let res = Document::from_tokens(tokens, &Options::default(), &mut layouter);
    assert!(matches!(res, Err(Error::TransportFailed(_))));
}

#[test]
fn elements_limit() {
    let mut tokens = vec![start("svg", &[], false)];
    for _ in 0..2000 {
        tokens.push(start("g", &[], false));
    }

    assert!(matches!(
        from_tokens(tokens),
        Err(Error::ElementsLimitReached)
    ));
}

#[test]
fn mismatched_end_tag() {
    let tokens = vec![
        start("svg", &[], false),
        start("g", &[], false),
        Token::End("a"),
        start("rect", &[("width", "1"), ("height", "1")], true),
        Token::End("svg"),
    ];

    let doc = from_tokens(tokens).unwrap();
    assert_eq!(doc.root().children().len(), 2);
}
