//! The area-method proof loop
//!
//! One [`AreaMethodProver`] handles one statement over a prefix of the
//! construction. Sub-proofs create a child prover on the same context at
//! depth + 1; the child's decisions land in the shared memo.

use super::context::ProverContext;
use super::report::ProofReport;
use crate::elimination::{construction_condition, eliminate, to_independent_variables, LemmaOracle};
use crate::expr::Expr;
use crate::geometry::CollinearCache;
use crate::ir::{
    NdgConditions, ProofError, ProofResult, ProofStep, ProofTrace, Statement, UnknownReason,
    Verdict,
};
use tracing::{debug, info, warn};

/// Proof attempt for one statement
pub struct AreaMethodProver<'c> {
    context: &'c ProverContext,
    prefix_len: usize,
    depth: usize,
    ndg: NdgConditions,
    trace: ProofTrace,
    eliminations: usize,
    expression_index: usize,
}

impl<'c> AreaMethodProver<'c> {
    /// Prover over the first `prefix_len` construction steps
    pub fn new(context: &'c ProverContext, prefix_len: usize, depth: usize) -> Self {
        Self {
            context,
            prefix_len: prefix_len.min(context.construction().len()),
            depth,
            ndg: NdgConditions::new(),
            trace: ProofTrace::new(),
            eliminations: 0,
            expression_index: 0,
        }
    }

    /// Decide `statement`
    ///
    /// Undecidable lemmas and exceeded resource ceilings end in an Unknown
    /// report. Invalid input is returned as an error and leaves the shared
    /// caches untouched.
    pub fn prove(mut self, statement: &Statement) -> ProofResult<ProofReport> {
        if let Some(holds) = self.context.cached_verdict(statement) {
            debug!(statement = %statement.name, holds, depth = self.depth, "memo hit");
            let verdict = Verdict::from(holds);
            self.trace.mark_decided(verdict);
            return Ok(self.into_report(statement, verdict, None, true));
        }

        self.validate(statement)?;
        self.log_problem(statement);
        let context = self.context;
        let cache = context.collinear_cache();

        let (verdict, reason) = match self.decide_statement(statement, cache) {
            Ok(holds) => (Verdict::from(holds), None),
            Err(err) => match err.unknown_reason() {
                Some(reason) => {
                    warn!(statement = %statement.name, depth = self.depth, %err, "proof inconclusive");
                    (Verdict::Unknown, Some(reason))
                }
                None => return Err(err),
            },
        };
        if verdict.is_decided() {
            self.context.remember(statement, verdict == Verdict::True);
        }

        self.trace.mark_decided(verdict);
        info!(
            statement = %statement.name,
            %verdict,
            depth = self.depth,
            eliminations = self.eliminations,
            "decided"
        );
        Ok(self.into_report(statement, verdict, reason, false))
    }

    fn into_report(
        self,
        statement: &Statement,
        verdict: Verdict,
        unknown_reason: Option<UnknownReason>,
        from_cache: bool,
    ) -> ProofReport {
        ProofReport {
            statement: statement.name.clone(),
            verdict,
            unknown_reason,
            ndg: self.ndg,
            trace: self.trace,
            eliminations: self.eliminations,
            from_cache,
        }
    }

    fn validate(&self, statement: &Statement) -> ProofResult<()> {
        if statement.is_empty() {
            return Err(ProofError::InvalidStatement(format!(
                "statement `{}` has no expressions",
                statement.name
            )));
        }
        let construction = self.context.construction();
        if let Some(point) = statement
            .points()
            .into_iter()
            .find(|p| !construction.defines_point_before(*p, self.prefix_len))
        {
            return Err(ProofError::InvalidStatement(format!(
                "statement `{}` refers to {}, which is not in the construction",
                statement.name,
                construction.label(point)
            )));
        }
        Ok(())
    }

    fn log_problem(&mut self, statement: &Statement) {
        let context = self.context;
        let construction = context.construction();
        let symbols = &construction.symbols;
        self.trace.add_metadata("statement", statement.name.clone());
        self.trace.add_metadata("depth", self.depth.to_string());
        self.trace.add_metadata("prefix_len", self.prefix_len.to_string());

        if self.depth == 0 {
            info!(steps = self.prefix_len, "construction");
            for step in &construction.steps()[..self.prefix_len] {
                debug!("  {}", construction.describe_step(step));
            }
            for point in construction.points().take_while(|p| {
                construction.defines_point_before(p.id, self.prefix_len)
            }) {
                if let Some(condition) = construction_condition(&point.kind) {
                    debug!(ndg = %condition.describe(symbols), "construction relies on");
                }
            }
        }
        info!(depth = self.depth, "prove {}", statement.display(symbols));
    }

    fn decide_statement(
        &mut self,
        statement: &Statement,
        cache: &'c CollinearCache,
    ) -> ProofResult<bool> {
        for (index, expr) in statement.expressions.iter().enumerate() {
            self.expression_index = index;
            if !self.prove_expression(expr, cache)? {
                debug!(index, "expression does not vanish");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Drive one expression to its final zero test
    fn prove_expression(&mut self, expr: &Expr, cache: &'c CollinearCache) -> ProofResult<bool> {
        let context = self.context;
        let construction = context.construction();
        let config = context.config();

        let current = self.pass("uniformize", expr.uniformize());
        let mut current = self.pass("simplify", current.simplify());

        for step in construction.steps()[..self.prefix_len].iter().rev() {
            if current.is_zero() {
                break;
            }
            let Some(point) = step.as_point() else {
                continue;
            };
            if !point.is_eliminable() || !current.contains_point(point.id) {
                continue;
            }

            current = self.pass("collinear", current.simplify_collinear_points(cache));
            current = self.pass("uniformize", current.uniformize());
            current = self.pass("simplify", current.simplify());

            let mut lemmas = LemmaProver::new(context, self.depth);
            let eliminated = eliminate(
                &current,
                point.id,
                construction,
                cache,
                &mut lemmas,
                &mut self.ndg,
            );
            self.absorb(lemmas);
            let eliminated = eliminated?;
            context.record_elimination();
            self.eliminations += 1;
            current = self.pass_with(
                "eliminate",
                eliminated,
                format!("eliminate {}", construction.label(point.id)),
            );

            let size = current.size();
            if size > config.max_expression_size {
                return Err(ProofError::SizeLimit {
                    size,
                    limit: config.max_expression_size,
                });
            }

            current = self.pass("collinear", current.simplify_collinear_points(cache));
            current = self.pass("uniformize", current.uniformize());
            current = self.pass("simplify", current.simplify());
            current = self.pass("single_fraction", current.reduce_to_single_fraction());
            current = self.pass("numerator", current.numerator());
            current = self.pass("simplify", current.simplify());
        }

        current = self.regroup(current)?;
        if current.is_zero() {
            return Ok(true);
        }

        let mut lemmas = LemmaProver::new(context, self.depth);
        let independent = to_independent_variables(&current, construction, &mut lemmas);
        self.absorb(lemmas);
        current = self.pass("independent_variables", independent?);
        current = self.pass("uniformize", current.uniformize());
        current = self.pass("simplify", current.simplify());
        current = self.regroup(current)?;
        Ok(current.is_zero())
    }

    /// Single fraction, numerator, then full expansion and grouping
    fn regroup(&mut self, expr: Expr) -> ProofResult<Expr> {
        let limit = self.context.config().max_expansion_terms;
        let current = self.pass("single_fraction", expr.reduce_to_single_fraction());
        let current = self.pass("numerator", current.numerator());
        let current = self.pass("simplify", current.simplify());

        let wrapped = Expr::unit_product(current);
        let terms = wrapped.expansion_terms();
        if terms > limit {
            return Err(ProofError::SizeLimit { size: terms, limit });
        }
        let current = self.pass("right_associative", wrapped.reduce_to_right_associative_form());
        let current = self.pass("group", current.group_sum_of_products());
        Ok(self.pass("simplify", current.simplify()))
    }

    fn absorb(&mut self, lemmas: LemmaProver<'_>) {
        self.ndg.extend(&lemmas.ndg);
        self.eliminations += lemmas.eliminations;
        if !self.context.config().record_trace {
            return;
        }
        for (name, verdict) in lemmas.decided {
            let step = ProofStep::new(self.trace.next_id(), "lemma", self.expression_index, 0, None)
                .with_explanation(format!("{}: {}", name, verdict));
            self.trace.add_step(step);
        }
    }

    fn pass(&mut self, name: &str, expr: Expr) -> Expr {
        self.record(name, &expr, None);
        expr
    }

    fn pass_with(&mut self, name: &str, expr: Expr, explanation: String) -> Expr {
        self.record(name, &expr, Some(explanation));
        expr
    }

    fn record(&mut self, name: &str, expr: &Expr, explanation: Option<String>) {
        let context = self.context;
        let config = context.config();
        let size = expr.size();
        let rendered = if size < config.print_size_limit {
            let text = expr.display(&context.construction().symbols).to_string();
            debug!(pass = name, size, depth = self.depth, "{}", text);
            Some(text)
        } else {
            debug!(pass = name, size, depth = self.depth, "Too large to be printed");
            None
        };

        if config.record_trace {
            let explanation = explanation
                .or_else(|| rendered.is_none().then(|| "Too large to be printed".to_string()));
            let mut step = ProofStep::new(
                self.trace.next_id(),
                name,
                self.expression_index,
                size,
                rendered,
            );
            if let Some(explanation) = explanation {
                step = step.with_explanation(explanation);
            }
            self.trace.add_step(step);
        }
    }
}

/// Answers lemma requests with sub-proofs on the shared context
struct LemmaProver<'c> {
    context: &'c ProverContext,
    depth: usize,
    ndg: NdgConditions,
    eliminations: usize,
    decided: Vec<(String, Verdict)>,
}

impl<'c> LemmaProver<'c> {
    fn new(context: &'c ProverContext, depth: usize) -> Self {
        Self {
            context,
            depth,
            ndg: NdgConditions::new(),
            eliminations: 0,
            decided: Vec::new(),
        }
    }
}

impl LemmaOracle for LemmaProver<'_> {
    fn decide(&mut self, statement: &Statement, prefix_len: usize) -> ProofResult<bool> {
        let limit = self.context.config().max_subproof_depth;
        if self.depth >= limit {
            return Err(ProofError::DepthLimit(limit));
        }

        let report =
            AreaMethodProver::new(self.context, prefix_len, self.depth + 1).prove(statement)?;
        self.ndg.extend(&report.ndg);
        self.eliminations += report.eliminations;
        self.decided.push((statement.name.clone(), report.verdict));

        match (report.verdict, report.unknown_reason) {
            (Verdict::True, _) => Ok(true),
            (Verdict::False, _) => Ok(false),
            (Verdict::Unknown, Some(UnknownReason::DepthLimit { limit })) => {
                Err(ProofError::DepthLimit(limit))
            }
            (Verdict::Unknown, Some(UnknownReason::SizeLimit { size, limit })) => {
                Err(ProofError::SizeLimit { size, limit })
            }
            (Verdict::Unknown, _) => Err(ProofError::Inconclusive {
                statement: statement.clone(),
            }),
        }
    }
}
