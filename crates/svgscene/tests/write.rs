use svgscene::{Document, Indent, Options, RecordingBackend, SimpleTextLayouter, WriteOptions};

fn parse(svg: &str) -> Document {
    let mut layouter = SimpleTextLayouter::new();
    Document::from_str(svg, &Options::default(), &mut layouter).unwrap()
}

fn compact() -> WriteOptions {
    WriteOptions {
        indent: Indent::None,
        ..WriteOptions::default()
    }
}

fn resave(svg: &str) -> String {
    parse(svg).to_svg_string(&compact())
}

fn draw(doc: &Document) -> Vec<svgscene::DrawCommand> {
    let mut backend = RecordingBackend::new();
    svgscene::render(doc, &mut backend);
    backend.into_commands()
}

#[test]
fn root_element() {
    let svg = "
    <svg width='200' height='100' viewBox='0 0 100 50' xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10'/>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.starts_with(
        "<svg width=\"200\" height=\"100\" xmlns=\"http://www.w3.org/2000/svg\">\
         <g transform=\"matrix(2 0 0 2 0 0)\">"
    ));
    assert!(!out.contains("viewBox"));
}

#[test]
fn identity_root_transform() {
    let out = resave("<svg width='10' height='10' xmlns='http://www.w3.org/2000/svg'/>");
    assert!(!out.contains("<g"));
    assert!(!out.contains("transform"));
}

#[test]
fn rect() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g fill='red'>
            <rect x='1' y='2' width='3' height='4'/>
        </g>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.contains(
        "<g><rect x=\"1\" y=\"2\" width=\"3\" height=\"4\" fill=\"#ff0000\" stroke=\"none\"/></g>"
    ));
}

#[test]
fn path() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path d='m 10 10 l 10 10 z' fill='none'/>
        <polygon points='0 0 5 0 5 5'/>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.contains("<path d=\"M 10 10 L 20 20 Z\" fill=\"none\" stroke=\"none\"/>"));
    assert!(out.contains("<path d=\"M 0 0 L 5 0 L 5 5 Z\""));
}

#[test]
fn paint_opacity() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle r='5' fill='#ff000080' fill-opacity='0.5' stroke='blue' stroke-opacity='0.25'/>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.contains("fill=\"#ff000080\" fill-opacity=\"0.5\""));
    assert!(out.contains("stroke=\"#0000ff\" stroke-opacity=\"0.25\""));
}

#[test]
fn stroke_properties() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <line x2='10' stroke='red' stroke-width='2.5' stroke-linecap='round'/>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.contains(
        "<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"0\" fill=\"#000000\" stroke=\"#ff0000\" \
         stroke-width=\"2.5\" stroke-linecap=\"round\"/>"
    ));
}

#[test]
fn text() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text x='5' y='10' font-size='20'>A &amp; B</text>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.contains(
        "<text xml:space=\"preserve\" transform=\"matrix(1 0 0 1 5 10)\" \
         fill=\"#000000\" stroke=\"none\" font-size=\"20\">A &amp; B</text>"
    ));
}

#[test]
fn nested_viewport() {
    let svg = "
    <svg width='100' height='100' xmlns='http://www.w3.org/2000/svg'>
        <svg x='10' y='20'>
            <rect width='1' height='1'/>
        </svg>
    </svg>
    ";

    let out = resave(svg);
    assert!(out.contains("<g transform=\"matrix(1 0 0 1 10 20)\"><rect"));
    assert_eq!(out.matches("<svg").count(), 1);
}

#[test]
fn single_quote() {
    let opt = WriteOptions {
        use_single_quote: true,
        ..compact()
    };

    let out = parse("<svg width='10' height='10' xmlns='http://www.w3.org/2000/svg'/>")
        .to_svg_string(&opt);
    assert!(out.starts_with("<svg width='10' height='10'"));
}

#[test]
fn coordinates_precision() {
    let opt = WriteOptions {
        coordinates_precision: 2,
        ..compact()
    };

    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><circle r='1.23456'/></svg>";
    let out = parse(svg).to_svg_string(&opt);
    assert!(out.contains("r=\"1.23\""));
}

#[test]
fn indent() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><g><circle r='1'/></g></svg>";
    let out = parse(svg).to_svg_string(&WriteOptions::default());
    assert!(out.contains("\n    <g>\n        <circle"));
}

#[test]
fn resave_keeps_rendering() {
    let svg = "
    <svg width='200' height='200' viewBox='0 0 100 100' xmlns='http://www.w3.org/2000/svg'>
        <g fill='red' stroke='blue' stroke-width='2' transform='translate(10 20) scale(2)'>
            <rect x='1' y='2' width='3' height='4'/>
            <circle cx='5' cy='5' r='4' fill='none'/>
            <path d='M 10 20 Q 15 25 20 20 C 25 15 30 25 35 20 A 5 5 0 1 0 45 20 Z'/>
        </g>
        <svg x='10' y='10'>
            <line x2='10' y2='10' stroke='#00ff00' stroke-linecap='square'/>
        </svg>
        <text x='5' y='90' font-family='Arial' font-size='8'>Some text</text>
    </svg>
    ";

    let doc = parse(svg);
    let resaved = parse(&doc.to_svg_string(&WriteOptions::default()));

    assert_eq!(doc.size(), resaved.size());
    assert_eq!(draw(&doc), draw(&resaved));
    assert!(resaved.diagnostics().is_empty());
}
