use ripple_core::package::{PublishedAssembly, PublishedPackage};
use ripple_core::solution::Solution;
use ripple_graph::{build, GraphError, SolutionGraph};

fn fubu_solutions() -> Vec<Solution> {
    vec![
        Solution::new("FubuCore").publishes(PublishedPackage::new("FubuCore", "1.0.0.0")),
        Solution::new("HtmlTags").publishes(
            PublishedPackage::new("HtmlTags", "1.0.0.0").assembly("HtmlTags.dll", "lib\\4.0"),
        ),
        Solution::new("Bottles")
            .publishes(
                PublishedPackage::new("Bottles", "1.0.0.0")
                    .assembly("Bottles.dll", "lib")
                    .depends_on("FubuCore"),
            )
            .references("Bottles", "FubuCore"),
        Solution::new("FubuLocalization")
            .publishes(
                PublishedPackage::new("FubuLocalization", "1.0.0.0")
                    .assembly("FubuLocalization.dll", "lib")
                    .depends_on("FubuCore"),
            )
            .references("FubuLocalization", "FubuCore"),
        Solution::new("FubuMVC")
            .publishes(
                PublishedPackage::new("FubuMVC.Core", "1.0.0.0")
                    .assembly("FubuMVC.Core.dll", "lib\\net40")
                    .depends_on("Bottles")
                    .depends_on("FubuCore")
                    .depends_on("FubuLocalization")
                    .depends_on("HtmlTags"),
            )
            .references("FubuMVC.Core", "Bottles")
            .references("FubuMVC.Core", "FubuCore")
            .references("FubuMVC.Core", "FubuLocalization")
            .references("FubuMVC.Core", "HtmlTags")
            .references("FubuMVC.Core", "CommonServiceLocator"),
        Solution::new("FubuMVC.Core.View")
            .publishes(
                PublishedPackage::new("FubuMVC.Core.View", "1.0.0.0")
                    .assembly("FubuMVC.Core.View.dll", "lib\\net40")
                    .depends_on("FubuMVC.Core"),
            )
            .references("FubuMVC.Core.View", "Bottles")
            .references("FubuMVC.Core.View", "FubuCore")
            .references("FubuMVC.Core.View", "FubuLocalization")
            .references("FubuMVC.Core.View", "FubuMVC.Core")
            .references("FubuMVC.Core.View", "HtmlTags"),
        Solution::new("FubuMVC.Core.UI")
            .publishes(
                PublishedPackage::new("FubuMVC.Core.UI", "1.0.0.0")
                    .assembly("FubuMVC.Core.UI.dll", "lib\\net40")
                    .depends_on("FubuMVC.Core.View"),
            )
            .references("FubuMVC.Core.UI", "Bottles")
            .references("FubuMVC.Core.UI", "FubuCore")
            .references("FubuMVC.Core.UI", "FubuLocalization")
            .references("FubuMVC.Core.UI", "FubuMVC.Core")
            .references("FubuMVC.Core.UI", "FubuMVC.Core.View")
            .references("FubuMVC.Core.UI", "HtmlTags")
            .references("FubuMVC.Core.UI", "FubuMVC.Core.UI"),
    ]
}

fn names(solutions: Vec<&Solution>) -> Vec<&str> {
    solutions.into_iter().map(|s| s.name.as_str()).collect()
}

fn dependency_names<'a>(graph: &'a SolutionGraph, name: &str) -> Vec<&'a str> {
    let solution = graph.solution(name).unwrap();
    names(graph.solution_dependencies(solution))
}

#[test]
fn solutions_come_back_in_dependency_order() {
    let graph = build(fubu_solutions()).unwrap();
    assert_eq!(
        names(graph.all_solutions()),
        [
            "FubuCore",
            "HtmlTags",
            "Bottles",
            "FubuLocalization",
            "FubuMVC",
            "FubuMVC.Core.View",
            "FubuMVC.Core.UI",
        ]
    );
}

#[test]
fn build_order_is_identical_across_builds() {
    let first: Vec<String> = build(fubu_solutions())
        .unwrap()
        .all_solutions()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    for _ in 0..5 {
        let again: Vec<String> = build(fubu_solutions())
            .unwrap()
            .all_solutions()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn swapping_independent_solutions_swaps_their_output_position() {
    let mut solutions = fubu_solutions();
    solutions.swap(0, 1);
    let graph = build(solutions).unwrap();
    let order = names(graph.all_solutions());
    assert_eq!(&order[..2], ["HtmlTags", "FubuCore"]);
}

#[test]
fn solutions_list_their_direct_dependencies() {
    let graph = build(fubu_solutions()).unwrap();
    assert!(dependency_names(&graph, "FubuCore").is_empty());
    assert_eq!(dependency_names(&graph, "Bottles"), ["FubuCore"]);
    assert_eq!(dependency_names(&graph, "FubuLocalization"), ["FubuCore"]);
    assert_eq!(
        dependency_names(&graph, "FubuMVC"),
        ["Bottles", "FubuCore", "FubuLocalization", "HtmlTags"]
    );
    assert_eq!(
        dependency_names(&graph, "FubuMVC.Core.View"),
        ["Bottles", "FubuCore", "FubuLocalization", "FubuMVC", "HtmlTags"]
    );
    assert_eq!(
        dependency_names(&graph, "FubuMVC.Core.UI"),
        [
            "Bottles",
            "FubuCore",
            "FubuLocalization",
            "FubuMVC",
            "FubuMVC.Core.View",
            "HtmlTags"
        ]
    );
}

#[test]
fn dependencies_are_not_transitive() {
    let solutions = vec![
        Solution::new("Core"),
        Solution::new("Web").references("Web", "Core"),
        Solution::new("App").references("App", "Web"),
    ];
    let graph = build(solutions).unwrap();
    assert_eq!(dependency_names(&graph, "App"), ["Web"]);
}

#[test]
fn dependents_are_the_reverse_edges() {
    let graph = build(fubu_solutions()).unwrap();
    let fubu_mvc = graph.solution("FubuMVC").unwrap();
    assert_eq!(
        names(graph.solution_dependents(fubu_mvc)),
        ["FubuMVC.Core.UI", "FubuMVC.Core.View"]
    );
}

#[test]
fn self_references_and_external_packages_add_no_edges() {
    let graph = build(fubu_solutions()).unwrap();
    let ui = graph.solution("FubuMVC.Core.UI").unwrap();
    assert!(!graph
        .solution_dependencies(ui)
        .iter()
        .any(|s| s.name == "FubuMVC.Core.UI"));
    assert!(graph.solution_dependents(ui).is_empty());
}

#[test]
fn solution_name_wins_over_package_name() {
    // "Shared" is a solution and, coincidentally, a package published by "Other".
    let solutions = vec![
        Solution::new("Shared"),
        Solution::new("Other").publishes(PublishedPackage::new("Shared", "1.0.0.0")),
        Solution::new("App").references("App", "Shared"),
    ];
    let graph = build(solutions).unwrap();
    assert_eq!(dependency_names(&graph, "App"), ["Shared"]);
}

#[test]
fn package_dependencies_do_not_create_edges() {
    let solutions = vec![
        Solution::new("App")
            .publishes(PublishedPackage::new("App", "1.0.0.0").depends_on("Core")),
        Solution::new("Core").publishes(PublishedPackage::new("Core", "1.0.0.0")),
    ];
    let graph = build(solutions).unwrap();
    assert!(dependency_names(&graph, "App").is_empty());
    assert_eq!(names(graph.all_solutions()), ["App", "Core"]);
}

#[test]
fn solution_graph_can_find_package_specs() {
    let graph = build(fubu_solutions()).unwrap();
    for name in [
        "FubuCore",
        "FubuLocalization",
        "Bottles",
        "FubuMVC.Core.View",
        "FubuMVC.Core.UI",
        "FubuMVC.Core",
        "HtmlTags",
    ] {
        assert!(graph.find_package_spec(name).is_some(), "{name}");
    }
    assert_eq!(graph.owner_of("FubuMVC.Core").unwrap().name, "FubuMVC");
}

#[test]
fn unknown_packages_are_absent_not_errors() {
    let graph = build(fubu_solutions()).unwrap();
    assert!(graph.find_package_spec("CommonServiceLocator").is_none());
    assert!(graph.find_package_spec("structuremap").is_none());
    assert!(graph.owner_of("structuremap").is_none());
}

#[test]
fn published_assemblies_not_directly_in_lib() {
    let graph = build(fubu_solutions()).unwrap();
    let spec = graph.find_package_spec("HtmlTags").unwrap();
    assert_eq!(
        spec.assemblies,
        vec![PublishedAssembly::new("HtmlTags.dll", "lib/4.0")]
    );
}

#[test]
fn default_assembly_is_synthesized() {
    let graph = build(fubu_solutions()).unwrap();
    let spec = graph.find_package_spec("FubuCore").unwrap();
    assert_eq!(
        spec.assemblies,
        vec![PublishedAssembly::new("FubuCore.dll", "lib")]
    );
}

#[test]
fn all_packages_are_listed_by_name() {
    let graph = build(fubu_solutions()).unwrap();
    let packages: Vec<&str> = graph
        .all_packages()
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(
        packages,
        [
            "Bottles",
            "FubuCore",
            "FubuLocalization",
            "FubuMVC.Core",
            "FubuMVC.Core.UI",
            "FubuMVC.Core.View",
            "HtmlTags",
        ]
    );
    assert_eq!(graph.len(), 7);
}

#[test]
fn missing_solution_is_not_found() {
    let graph = build(fubu_solutions()).unwrap();
    assert_eq!(
        graph.solution("StructureMap").unwrap_err(),
        GraphError::NotFound("StructureMap".to_string())
    );
}

#[test]
fn duplicate_package_name_fails_in_either_order() {
    let a = Solution::new("A").publishes(PublishedPackage::new("Shared", "1.0.0.0"));
    let b = Solution::new("B").publishes(PublishedPackage::new("Shared", "2.0.0.0"));

    let err = build(vec![a.clone(), b.clone()]).unwrap_err();
    assert_eq!(
        err,
        GraphError::DuplicatePackageName {
            package: "Shared".to_string(),
            first: "A".to_string(),
            second: "B".to_string(),
        }
    );

    let err = build(vec![b, a]).unwrap_err();
    assert!(matches!(err, GraphError::DuplicatePackageName { .. }));
}

#[test]
fn duplicate_solution_name_fails() {
    let err = build(vec![Solution::new("A"), Solution::new("A")]).unwrap_err();
    assert_eq!(err, GraphError::DuplicateSolutionName("A".to_string()));
}

#[test]
fn cycle_names_every_solution_on_it() {
    let solutions = vec![
        Solution::new("Core").references("Core", "App"),
        Solution::new("Web")
            .publishes(PublishedPackage::new("Web.Core", "1.0.0.0"))
            .references("Web.Core", "Core"),
        Solution::new("App").references("App", "Web.Core"),
    ];
    let err = build(solutions).unwrap_err();
    assert_eq!(
        err,
        GraphError::CyclicDependency {
            cycle: vec![
                "Core".to_string(),
                "App".to_string(),
                "Web".to_string(),
                "Core".to_string(),
            ]
        }
    );
    assert_eq!(
        err.to_string(),
        "cyclic dependency between solutions: Core -> App -> Web -> Core"
    );
}

#[test]
fn empty_fact_set_builds_an_empty_graph() {
    let graph = build(Vec::new()).unwrap();
    assert!(graph.is_empty());
    assert!(graph.all_solutions().is_empty());
    assert!(graph.all_packages().is_empty());
}
