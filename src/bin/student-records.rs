//! Command line client for the student records API

use clap::{Arg, ArgMatches, Command};
use dotenv::dotenv;
use log::debug;
use std::collections::BTreeMap;
use std::process;
use std::sync::Arc;

use student_records::auth::FileStorage;
use student_records::config::ClientOptions;
use student_records::error::Error;
use student_records::router::Route;
use student_records::signal::Signal;
use student_records::students::{Level, SortDirection, Student};
use student_records::views::{LoadState, StudentListView};
use student_records::StudentRecords;

const DEFAULT_STORAGE: &str = ".student-records.json";

fn cli() -> Command<'static> {
    Command::new("student-records")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage student records from the terminal")
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Base URL of the records API")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .value_name("FILE")
                .help("Session file")
                .takes_value(true)
                .global(true),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and remember the session")
                .arg(Arg::new("username").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and log in")
                .arg(Arg::new("username").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("list")
                .about("List students")
                .arg(Arg::new("page").long("page").takes_value(true))
                .arg(Arg::new("size").long("size").takes_value(true))
                .arg(Arg::new("sort-by").long("sort-by").takes_value(true))
                .arg(Arg::new("desc").long("desc").help("Sort descending"))
                .arg(
                    Arg::new("level")
                        .long("level")
                        .takes_value(true)
                        .possible_values(["BACHELOR", "MASTER", "PHD"]),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Search students by id or username")
                .arg(Arg::new("query").required(true))
                .arg(Arg::new("page").long("page").takes_value(true)),
        )
        .subcommand(
            Command::new("get")
                .about("Show one student")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("create")
                .about("Create a student")
                .arg(Arg::new("username").required(true))
                .arg(Arg::new("level").required(true)),
        )
        .subcommand(
            Command::new("update")
                .about("Change a student")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("username").long("username").takes_value(true))
                .arg(Arg::new("level").long("level").takes_value(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a student")
                .arg(Arg::new("id").required(true)),
        )
}

fn parse_number<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, Error> {
    match matches.value_of(name) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::general(format!("--{} expects a number, got {:?}", name, raw))),
        None => Ok(None),
    }
}

fn parse_id(matches: &ArgMatches) -> Result<i64, Error> {
    parse_number(matches, "id")?.ok_or_else(|| Error::general("missing id"))
}

/// Enter `route` through its guard, failing when redirected
fn enter(records: &StudentRecords, route: Route) -> Result<(), Error> {
    let entered = records.router().navigate(route.clone());
    if entered != route {
        debug!("{} redirected to {}", route, entered);
        return Err(Error::general("Not logged in. Run `student-records login` first."));
    }
    Ok(())
}

/// Turn a finished view state into a command result
fn finish(
    state: &Signal<LoadState>,
    errors: Option<&Signal<BTreeMap<String, String>>>,
) -> Result<(), Error> {
    if let Some(errors) = errors {
        let errors = errors.get();
        if !errors.is_empty() {
            for (field, message) in &errors {
                eprintln!("{}: {}", field, message);
            }
            return Err(Error::general("The server rejected the submitted values."));
        }
    }
    match state.get() {
        LoadState::Error(message) => Err(Error::general(message)),
        _ => Ok(()),
    }
}

fn print_student(student: &Student) {
    println!("{:>6}  {:<24} {}", student.id, student.username, student.level.label());
}

fn print_list(view: &StudentListView) {
    if view.is_empty() {
        println!("No students found");
        return;
    }
    println!("{:>6}  {:<24} {}", "ID", "USERNAME", "LEVEL");
    for student in view.students().get().iter() {
        print_student(student);
    }
    let info = view.page_info().get();
    println!(
        "page {} of {} ({} students)",
        info.number + 1,
        info.total_pages.max(1),
        info.total_elements
    );
}

async fn run(matches: ArgMatches) -> Result<(), Error> {
    let mut options = ClientOptions::from_env();
    if let Some(url) = matches.value_of("api-url") {
        options = options.with_api_url(url);
    }
    let storage_path = matches.value_of("storage").unwrap_or(DEFAULT_STORAGE);
    let storage = Arc::new(FileStorage::open(storage_path)?);
    let records = StudentRecords::new_with_storage(options, storage);

    match matches.subcommand() {
        Some(("login", sub)) | Some(("register", sub)) => {
            let is_login = matches!(matches.subcommand_name(), Some("login"));
            enter(&records, if is_login { Route::login() } else { Route::Register })
                .map_err(|_| Error::general("Already logged in. Run `student-records logout` first."))?;

            let username = sub.value_of("username").unwrap_or_default();
            let password = sub.value_of("password").unwrap_or_default();

            if is_login {
                let view = records.login_view();
                view.set_field("username", username);
                view.set_field("password", password);
                view.submit().await;
                finish(&view.state(), None)?;
            } else {
                let view = records.register_view();
                view.set_field("username", username);
                view.set_field("password", password);
                view.submit().await;
                finish(&view.state(), Some(&view.field_errors()))?;
            }
            println!("Logged in as {}", username);
        }
        Some(("logout", _)) => {
            records.navbar().logout();
            println!("Logged out");
        }
        Some(("whoami", _)) => match records.auth().current_user() {
            Some(user) if records.auth().is_authenticated() => println!("{}", user),
            _ => println!("Not logged in"),
        },
        Some(("list", sub)) => {
            enter(&records, Route::StudentList)?;
            let page = parse_number(sub, "page")?.unwrap_or(0);
            let size = parse_number(sub, "size")?;
            let level = sub.value_of("level").map(str::parse::<Level>).transpose()?;

            let view = records.list_view();
            view.filters().update(|filters| {
                if let Some(sort_by) = sub.value_of("sort-by") {
                    filters.sort_by = sort_by.to_string();
                }
                if sub.is_present("desc") {
                    filters.sort_direction = SortDirection::Desc;
                }
                filters.level = level;
            });
            view.page_info().update(|info| {
                if let Some(size) = size {
                    info.size = size;
                }
            });
            view.go_to_page(page).await;
            finish(&view.state(), None)?;
            print_list(&view);
        }
        Some(("search", sub)) => {
            enter(&records, Route::StudentList)?;
            let view = records.list_view();
            view.set_search_query(sub.value_of("query").unwrap_or_default());
            view.go_to_page(parse_number(sub, "page")?.unwrap_or(0)).await;
            finish(&view.state(), None)?;
            print_list(&view);
        }
        Some(("get", sub)) => {
            let id = parse_id(sub)?;
            enter(&records, Route::StudentDetail(id))?;
            let view = records.detail_view(id);
            view.load().await;
            finish(&view.state(), None)?;
            if let Some(student) = view.student().get() {
                print_student(&student);
            }
        }
        Some(("create", sub)) => {
            enter(&records, Route::StudentCreate)?;
            let view = records.create_view();
            view.set_field("username", sub.value_of("username").unwrap_or_default());
            view.set_field("level", &sub.value_of("level").unwrap_or_default().to_uppercase());
            view.submit().await;

            let form = view.form().get();
            if !form.is_valid() {
                for (_, message) in form.errors() {
                    eprintln!("{}", message);
                }
                return Err(Error::general("Invalid input."));
            }
            finish(&view.state(), Some(&view.field_errors()))?;
            println!("Created {}", records.router().current());
        }
        Some(("update", sub)) => {
            let id = parse_id(sub)?;
            enter(&records, Route::StudentEdit(id))?;
            let view = records.edit_view(id);
            view.load().await;
            finish(&view.page_state(), None)?;

            if let Some(username) = sub.value_of("username") {
                view.set_field("username", username);
            }
            if let Some(level) = sub.value_of("level") {
                view.set_field("level", &level.to_uppercase());
            }
            if !view.can_submit() {
                return Err(Error::general("Nothing to update, or the new values are invalid."));
            }
            view.submit().await;
            finish(&view.state(), Some(&view.field_errors()))?;
            println!("Updated {}", records.router().current());
        }
        Some(("delete", sub)) => {
            let id = parse_id(sub)?;
            enter(&records, Route::StudentDetail(id))?;
            let view = records.detail_view(id);
            view.load().await;
            finish(&view.state(), None)?;
            view.open_delete();
            view.confirm_delete().await;
            finish(&view.state(), None)?;
            println!("Deleted student {}", id);
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    let matches = cli().get_matches();
    if let Err(err) = run(matches).await {
        eprintln!("{}", err);
        process::exit(1);
    }
}
