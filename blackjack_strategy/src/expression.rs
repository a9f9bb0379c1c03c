use std::ops;

use crate::{StrategyError, ValueTable, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operation::Add => left + right,
            Operation::Subtract => left - right,
            Operation::Multiply => left * right,
            Operation::Divide => left / right,
        }
    }
}

/// An immutable symbolic arithmetic expression over named variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(f64),
    Variable(Variable),
    Sum(Vec<Expression>),
    Product(Vec<Expression>),
    Binary(Box<Expression>, Box<Expression>, Operation),
}

impl Expression {
    /// Builds an n-ary sum. Fails on an empty term list.
    pub fn sum(terms: Vec<Expression>) -> Result<Expression, StrategyError> {
        if terms.is_empty() {
            return Err(StrategyError::EmptyReduction("sum"));
        }
        Ok(Expression::Sum(terms))
    }

    /// Builds an n-ary product. Fails on an empty term list.
    pub fn product(terms: Vec<Expression>) -> Result<Expression, StrategyError> {
        if terms.is_empty() {
            return Err(StrategyError::EmptyReduction("product"));
        }
        Ok(Expression::Product(terms))
    }

    pub fn variable(variable: Variable) -> Expression {
        Expression::Variable(variable)
    }

    pub fn constant(value: f64) -> Expression {
        Expression::Constant(value)
    }

    pub fn evaluate(&self, values: &ValueTable) -> Result<f64, StrategyError> {
        match self {
            Expression::Constant(value) => Ok(*value),
            Expression::Variable(variable) => values.value(variable),
            Expression::Sum(terms) => reduce(terms, values, "sum", Operation::Add),
            Expression::Product(terms) => reduce(terms, values, "product", Operation::Multiply),
            Expression::Binary(left, right, operation) => {
                let left = left.evaluate(values)?;
                let right = right.evaluate(values)?;
                Ok(operation.apply(left, right))
            }
        }
    }

    /// Fully parenthesized infix form, for debugging.
    pub fn render(&self) -> String {
        match self {
            Expression::Constant(value) => format!("{:?}", value),
            Expression::Variable(variable) => variable.to_string(),
            Expression::Sum(terms) => render_terms(terms, " + "),
            Expression::Product(terms) => render_terms(terms, " * "),
            Expression::Binary(left, right, operation) => format!(
                "({} {} {})",
                left.render(),
                operation.symbol(),
                right.render()
            ),
        }
    }

    fn binary(self, rhs: Expression, operation: Operation) -> Expression {
        Expression::Binary(Box::new(self), Box::new(rhs), operation)
    }
}

/// Reduces the terms from left to right. There is no identity element: an
/// empty term list is an error.
fn reduce(
    terms: &[Expression],
    values: &ValueTable,
    kind: &'static str,
    operation: Operation,
) -> Result<f64, StrategyError> {
    let mut evaluated = terms.iter().map(|term| term.evaluate(values));
    let first = evaluated
        .next()
        .ok_or(StrategyError::EmptyReduction(kind))??;
    evaluated.try_fold(first, |acc, value| -> Result<f64, StrategyError> {
        Ok(operation.apply(acc, value?))
    })
}

fn render_terms(terms: &[Expression], separator: &str) -> String {
    let rendered: Vec<String> = terms.iter().map(Expression::render).collect();
    format!("({})", rendered.join(separator))
}

impl ops::Add for Expression {
    type Output = Expression;
    fn add(self, rhs: Expression) -> Self::Output {
        self.binary(rhs, Operation::Add)
    }
}

impl ops::Sub for Expression {
    type Output = Expression;
    fn sub(self, rhs: Expression) -> Self::Output {
        self.binary(rhs, Operation::Subtract)
    }
}

impl ops::Mul for Expression {
    type Output = Expression;
    fn mul(self, rhs: Expression) -> Self::Output {
        self.binary(rhs, Operation::Multiply)
    }
}

impl ops::Div for Expression {
    type Output = Expression;
    fn div(self, rhs: Expression) -> Self::Output {
        self.binary(rhs, Operation::Divide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Card;

    fn p(card: Card) -> Expression {
        Expression::variable(Variable::Probability(card))
    }

    fn bindings() -> ValueTable {
        let mut values = ValueTable::new();
        values.bind(Variable::Probability(Card::Two), 2.0);
        values.bind(Variable::Probability(Card::Ten), 20.0);
        values
    }

    #[test]
    fn evaluate_and_render_binary() {
        let expression = (p(Card::Two) + Expression::constant(10.0))
            - (p(Card::Ten) / Expression::constant(5.0));
        assert_eq!(expression.render(), "((p_2 + 10.0) - (p_T / 5.0))");
        assert_eq!(expression.evaluate(&bindings()), Ok(8.0));
    }

    #[test]
    fn evaluate_sum_and_product() {
        let sum = Expression::sum(vec![p(Card::Two), p(Card::Ten), Expression::constant(-1.0)])
            .unwrap();
        assert_eq!(sum.evaluate(&bindings()), Ok(21.0));

        let product = Expression::product(vec![p(Card::Two), p(Card::Ten)]).unwrap();
        assert_eq!(product.evaluate(&bindings()), Ok(40.0));
        assert_eq!(product.render(), "(p_2 * p_T)");
    }

    #[test]
    fn unbound_variable_propagates() {
        let expression = Expression::constant(1.0) - p(Card::Ace);
        assert_eq!(
            expression.evaluate(&bindings()),
            Err(StrategyError::UnboundVariable(Variable::Probability(Card::Ace)))
        );

        let nested = Expression::sum(vec![p(Card::Two), expression]).unwrap();
        assert!(matches!(
            nested.evaluate(&bindings()),
            Err(StrategyError::UnboundVariable(_))
        ));
    }

    #[test]
    fn empty_reduction_is_rejected() {
        assert_eq!(
            Expression::sum(Vec::new()),
            Err(StrategyError::EmptyReduction("sum"))
        );
        assert_eq!(
            Expression::product(Vec::new()),
            Err(StrategyError::EmptyReduction("product"))
        );
        assert_eq!(
            Expression::Product(Vec::new()).evaluate(&bindings()),
            Err(StrategyError::EmptyReduction("product"))
        );
    }
}
