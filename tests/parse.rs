use switchboard::{Arguments, Switch};

fn parse(tokens: &[&str]) -> Arguments {
    Arguments::parse(tokens.iter().copied())
}

fn switch(key: &str, value: &str) -> Switch {
    Switch::new(key, value)
}

#[test]
fn can_return_command() {
    let args = parse(&["run"]);

    assert_eq!(args.command(), Some("run"));
    assert!(args.switches().is_empty());
}

#[test]
fn leading_switch_means_no_command() {
    let args = parse(&["-file", r#""C:\temp\file.json""#]);

    assert_eq!(args.command(), None);
    assert_eq!(args.switches(), [switch("file", r"C:\temp\file.json")]);
}

#[test]
fn command_with_values_and_flags() {
    let args = parse(&[
        "run",
        "-path",
        r"c:\Program Files",
        "-dir",
        r"c:\Windows\Microsoft.NET\Framework",
        "-flag",
        "-moreflag",
    ]);

    assert_eq!(args.command(), Some("run"));
    assert_eq!(
        args.switches(),
        [
            switch("path", r"c:\Program Files"),
            switch("dir", r"c:\Windows\Microsoft.NET\Framework"),
            switch("flag", "true"),
            switch("moreflag", "true"),
        ]
    );

    assert_eq!(args.get::<String>("path").unwrap(), r"c:\Program Files");
    assert!(args.get::<bool>("flag").unwrap());
    assert!(args.get::<bool>("moreflag").unwrap());
    assert!(!args.get::<bool>("unknown").unwrap());
}

#[test]
fn single_token_aliases_agree() {
    for token in [r#"-path:"c:\temp""#, r#"-path="c:\temp""#, r#"-path"c:\temp""#] {
        let args = parse(&[token]);

        assert_eq!(args.command(), None, "{token}");
        assert_eq!(args.switches(), [switch("path", r"c:\temp")], "{token}");
    }
}

#[test]
fn short_numeric_form() {
    let args = parse(&["-n23"]);

    assert_eq!(args.switches(), [switch("n", "23")]);
    assert_eq!(args.get::<u16>("n").unwrap(), 23);
}

#[test]
fn short_numeric_form_after_hyphenated_name() {
    let args = parse(&["-max-depth3", "-my-port8080", "-n23x"]);

    assert_eq!(
        args.switches(),
        [
            switch("max-depth", "3"),
            switch("my-port", "8080"),
            switch("n", "23x"),
        ]
    );
    assert_eq!(args.get::<u16>("my-port").unwrap(), 8080);
}

#[test]
fn plain_token_after_switch_is_consumed() {
    let args = parse(&["copy", "-from", "a.txt", "b.txt", "-to", "c.txt"]);

    assert_eq!(args.command(), Some("copy"));
    assert_eq!(
        args.switches(),
        [switch("from", "a.txt"), switch("to", "c.txt")]
    );
}

#[test]
fn duplicates_are_kept_and_last_wins() {
    let args = parse(&["-level:1", "-level=2", "-level", "3"]);

    assert_eq!(args.switches().len(), 3);
    assert_eq!(args.last("level"), Some("3"));
    assert_eq!(args.get::<u8>("level").unwrap(), 3);
}

#[test]
fn lone_prefix_is_an_empty_flag() {
    let args = parse(&["-"]);

    assert_eq!(args.switches(), [switch("", "true")]);
}
