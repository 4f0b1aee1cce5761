use super::Connectivity;

pub fn factory(name: &str) -> Connectivity {
    match name {
        "unitcube" => Connectivity::unitcube(),
        "periodic" => Connectivity::periodic(),
        "rotwrap" => Connectivity::rotwrap(),
        "twocubes" => Connectivity::twocubes(),
        "twowrap" => Connectivity::twowrap(),
        "rotcubes" => Connectivity::rotcubes(),
        "brick" => Connectivity::brick(2, 2, 2, false, false, false),
        "shell" => Connectivity::shell(),
        "sphere" => Connectivity::sphere(),
        other => panic!("unknown factory {}", other),
    }
}

pub fn all_factories() -> Vec<Connectivity> {
    let mut out: Vec<Connectivity> = [
        "unitcube", "periodic", "rotwrap", "twocubes", "twowrap", "rotcubes", "brick", "shell",
        "sphere",
    ]
    .iter()
    .map(|name| factory(name))
    .collect();
    out.push(Connectivity::brick(3, 2, 1, true, false, false));
    out.push(Connectivity::brick(2, 2, 1, false, false, true));
    out
}
