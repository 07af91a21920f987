//! Integration coverage for the built-in function library (§6.3-§6.5),
//! exercised the way a Kaynat program actually calls them rather than by
//! invoking Rust functions directly.
//!
//! Kaynat has no quoted string literals (§4.1): the only way to spell a
//! string in source is a bare identifier, so a value containing '@', '/',
//! or digits (an email address, a file path, a JSON document) cannot be
//! typed as a literal argument. Tests that need one either build the value
//! at runtime through other built-ins (`generate_json`) or read it from a
//! scratch file whose *path* is itself a bare word in the crate's working
//! directory, the same way `read_file`/`write_file` are meant to be used.

use kaynat::Host;

struct BufferHost {
    lines: Vec<String>,
}

impl Host for BufferHost {
    fn print_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn read_line(&mut self) -> std::io::Result<String> {
        Ok(String::new())
    }
}

fn run(source: &str) -> Vec<String> {
    let mut host = BufferHost { lines: Vec::new() };
    kaynat::run_source(source, &mut host).expect("program should run without error");
    host.lines
}

/// Removes its scratch file on drop, panic or not, so a failing assertion
/// never leaves test litter in the crate's working directory.
struct ScratchFile(&'static str);

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(self.0);
    }
}

#[test]
fn math_builtins_cover_roots_rounding_and_number_theory() {
    let out = run(
        "call sqrt with 16 and store as a . say a .\n\
         call round_number with 3.14159 and store as b . say b .\n\
         call gcd with 12 and 18 and store as c . say c .\n\
         call is_prime with 17 and store as d . say d .\n\
         call factorial with 5 and store as e . say e .\n",
    );
    assert_eq!(out, vec!["4", "3", "6", "true", "120"]);
}

#[test]
fn string_builtins_cover_case_trim_and_search() {
    let out = run(
        "call to_uppercase with hello and store as a . say a .\n\
         call trim with hello and store as b . say b .\n\
         call starts_with with hello and he and store as c . say c .\n\
         call find_position with hello and l and store as d . say d .\n\
         call string_length with hello and store as e . say e .\n",
    );
    assert_eq!(out, vec!["HELLO", "hello", "true", "2", "5"]);
}

#[test]
fn list_builtins_cover_mutation_search_and_aggregation() {
    let out = run(
        "create a list called nums .\n\
         call list_append with nums and 3 and store as ignored1 .\n\
         call list_append with nums and 1 and store as ignored2 .\n\
         call list_append with nums and 2 and store as ignored3 .\n\
         call list_sum with nums and store as total . say total .\n\
         call list_max with nums and store as biggest . say biggest .\n\
         call list_sort with nums and store as sorted . say sorted .\n",
    );
    assert_eq!(out, vec!["6", "3", "[1, 2, 3]"]);
}

#[test]
fn json_round_trips_a_list_built_at_runtime() {
    // The JSON text never appears as source literal syntax (Kaynat has
    // none to offer); it is produced by `generate_json` and consumed by
    // `parse_json` as an ordinary runtime string.
    let out = run(
        "create a list called nums .\n\
         call list_append with nums and 1 and store as i1 .\n\
         call list_append with nums and 2 and store as i2 .\n\
         call list_append with nums and 3 and store as i3 .\n\
         call generate_json with nums and store as text .\n\
         call parse_json with text and store as decoded .\n\
         call list_length with decoded and store as n . say n .\n\
         call list_sum with decoded and store as total . say total .\n",
    );
    assert_eq!(out, vec!["3", "6"]);
}

#[test]
fn crypto_hash_is_deterministic_and_hex_encoded() {
    let out = run("call hash_sha256 with abc and store as h . say h .\n");
    assert_eq!(out, vec!["ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"]);
}

#[test]
fn base64_round_trips_a_plain_word() {
    let out = run(
        "call encode_base64 with hello and store as encoded . say encoded .\n\
         call decode_base64 with encoded and store as decoded . say decoded .\n",
    );
    assert_eq!(out, vec!["aGVsbG8=", "hello"]);
}

#[test]
fn pattern_matching_on_a_plain_word() {
    let out = run(
        "call matches_pattern with hello and pattern hell and store as ok . say ok .\n\
         call find_matches with hello and pattern l and store as matches .\n\
         call list_length with matches and store as count . say count .\n",
    );
    assert_eq!(out, vec!["true", "2"]);
}

#[test]
fn email_validation_reads_the_candidate_from_a_scratch_file() {
    let _guard = ScratchFile("kaynatemailscratch");
    std::fs::write("kaynatemailscratch", "person@example.com").expect("write scratch file");
    let out = run(
        "call read_file with kaynatemailscratch and store as candidate .\n\
         call is_valid_email with candidate and store as valid . say valid .\n",
    );
    assert_eq!(out, vec!["true"]);
}

#[test]
fn is_valid_email_rejects_a_bare_word() {
    let out = run("call is_valid_email with notanemail and store as valid . say valid .\n");
    assert_eq!(out, vec!["false"]);
}

#[test]
fn file_builtins_write_read_and_delete_a_scratch_file() {
    let _guard = ScratchFile("kaynatfilescratch");
    let out = run(
        "call write_file with kaynatfilescratch and hello and store as wrote . say wrote .\n\
         call file_exists with kaynatfilescratch and store as exists . say exists .\n\
         call read_file with kaynatfilescratch and store as content . say content .\n\
         call delete_file with kaynatfilescratch and store as deleted . say deleted .\n\
         call file_exists with kaynatfilescratch and store as goneafter . say goneafter .\n",
    );
    assert_eq!(out, vec!["true", "true", "hello", "true", "false"]);
}

#[test]
fn network_builtins_are_reserved_but_disabled() {
    let mut host = BufferHost { lines: Vec::new() };
    let err =
        kaynat::run_source("call fetch_url with example and store as page .\n", &mut host).unwrap_err();
    assert_eq!(err.label(), "RuntimeError");
}
